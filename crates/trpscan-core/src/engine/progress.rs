/// Events emitted while a batch is processed.
#[derive(Debug, Clone)]
pub enum Progress {
    /// Analysis of `total_files` input files is about to begin.
    BatchStart { total_files: u64 },
    /// One input file has been analysed (successfully or not).
    FileFinished {
        name: String,
        contacts: usize,
        failed: bool,
    },
    /// All files have been analysed and their rows written.
    BatchFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
