//! In-memory `SeriesSource` that counts fetches and can be told to fail.

use std::cell::Cell;

use open_stats::data::SeriesSource;
use open_stats::domain::{Provider, RawTable, SeriesQuery};
use open_stats::error::FetchError;

pub struct FakeSource {
    provider: Provider,
    table: RawTable,
    fail: Cell<bool>,
    calls: Cell<usize>,
}

impl FakeSource {
    pub fn new(provider: Provider, table: RawTable) -> Self {
        Self {
            provider,
            table,
            fail: Cell::new(false),
            calls: Cell::new(0),
        }
    }

    /// Make subsequent fetches fail with a 503 until reset.
    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl SeriesSource for FakeSource {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn fetch(&self, _query: &SeriesQuery) -> Result<RawTable, FetchError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail.get() {
            return Err(FetchError::Status {
                provider: self.provider,
                status: 503,
                attempts: 5,
            });
        }
        Ok(self.table.clone())
    }
}
