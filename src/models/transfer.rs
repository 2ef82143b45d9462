use serde::Deserialize;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Global transfer rates from qBittorrent's `transfer/info`, in bytes/sec
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct TransferInfo {
    #[serde(default)]
    pub dl_info_speed: u64,
    #[serde(default)]
    pub up_info_speed: u64,
}

/// One tick's download/upload rate, in MB/s
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransferSample {
    pub download: f64,
    pub upload: f64,
}

impl From<TransferInfo> for TransferSample {
    fn from(info: TransferInfo) -> Self {
        Self {
            download: info.dl_info_speed as f64 / BYTES_PER_MEGABYTE,
            upload: info.up_info_speed as f64 / BYTES_PER_MEGABYTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_converts_to_megabytes() {
        let info = TransferInfo {
            dl_info_speed: 3 * 1024 * 1024,
            up_info_speed: 512 * 1024,
        };
        let sample = TransferSample::from(info);
        assert_eq!(sample.download, 3.0);
        assert_eq!(sample.upload, 0.5);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let info: TransferInfo = serde_json::from_str(r#"{"dl_info_speed":100}"#).unwrap();
        assert_eq!(info.dl_info_speed, 100);
        assert_eq!(info.up_info_speed, 0);
    }
}
