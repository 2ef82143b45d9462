pub mod episode;
pub mod movie;
pub mod torrent;
pub mod transfer;
