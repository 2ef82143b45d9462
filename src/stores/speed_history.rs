use crate::models::transfer::TransferSample;

/// Fixed-capacity FIFO of `f64` samples.
///
/// Storage is allocated once; `push` overwrites the oldest slot when full.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    slots: Box<[f64]>,
    /// Index of the oldest sample
    head: usize,
    len: usize,
}

impl RingBuffer {
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Config validation rejects that value.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be greater than 0");

        Self {
            slots: vec![0.0; capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        let capacity = self.capacity();
        let tail = (self.head + self.len) % capacity;
        self.slots[tail] = value;

        if self.len == capacity {
            self.head = (self.head + 1) % capacity;
        } else {
            self.len += 1;
        }
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.slots[(self.head + i) % self.capacity()])
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    pub fn latest(&self) -> Option<f64> {
        if self.len == 0 {
            None
        } else {
            Some(self.slots[(self.head + self.len - 1) % self.capacity()])
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Download and upload rate history in MB/s, one sample per tick
#[derive(Debug, Clone)]
pub struct SpeedHistory {
    download: RingBuffer,
    upload: RingBuffer,
}

impl SpeedHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            download: RingBuffer::with_capacity(capacity),
            upload: RingBuffer::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, sample: TransferSample) {
        self.download.push(sample.download);
        self.upload.push(sample.upload);
    }

    pub fn download(&self) -> &RingBuffer {
        &self.download
    }

    pub fn upload(&self) -> &RingBuffer {
        &self.upload
    }

    pub fn len(&self) -> usize {
        self.download.len()
    }

    pub fn is_empty(&self) -> bool {
        self.download.is_empty()
    }
}
