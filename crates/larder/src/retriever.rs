use larder_core::{driver::Rows, Error, FieldMapping, Record, Result};

use std::{fmt, marker::PhantomData, sync::Arc};

/// A one-shot retrieval bound to one executed query.
///
/// Obtained from [`Db::retriever`](crate::Db::retriever). Each `retrieve`
/// call scans one result row into the caller's record, using the same field
/// ordering the SELECT was built from. Once the rows are drained, every
/// further call reports end-of-results; after `close`, a closed error.
pub struct Retriever<R> {
    state: State,
    mapping: Arc<FieldMapping>,
    _p: PhantomData<fn(R)>,
}

enum State {
    Open(Rows),
    Exhausted,
    Closed,
}

impl<R: Record> Retriever<R> {
    pub(crate) fn new(mapping: Arc<FieldMapping>, rows: Rows) -> Self {
        Self {
            state: State::Open(rows),
            mapping,
            _p: PhantomData,
        }
    }

    /// Scans the next matching row into `target`, in place.
    ///
    /// Returns an [end-of-results](Error::is_end_of_results) error once no
    /// rows remain: the normal loop-termination signal, not a failure. An
    /// exhausted retriever keeps reporting end-of-results without touching
    /// `target`.
    ///
    /// # Panics
    ///
    /// Panics if a row's width disagrees with the record's field count,
    /// which would mean the scan ordering no longer matches the SELECT that
    /// produced it.
    pub fn retrieve(&mut self, target: &mut R) -> Result<()> {
        match &mut self.state {
            State::Closed => Err(Error::closed()),
            State::Exhausted => Err(Error::end_of_results()),
            State::Open(rows) => match rows.next() {
                Some(row) => {
                    assert_eq!(
                        row.len(),
                        self.mapping.len(),
                        "row width does not match record shape"
                    );
                    target.load(row)
                }
                None => {
                    self.state = State::Exhausted;
                    Err(Error::end_of_results())
                }
            },
        }
    }

    /// Collects all remaining rows into fresh records.
    pub fn collect<B>(mut self) -> Result<B>
    where
        R: Default,
        B: Default + Extend<R>,
    {
        let mut ret = B::default();

        loop {
            let mut record = R::default();
            match self.retrieve(&mut record) {
                Ok(()) => ret.extend(Some(record)),
                Err(err) if err.is_end_of_results() => return Ok(ret),
                Err(err) => return Err(err),
            }
        }
    }

    /// Releases the remaining rows. Further `retrieve` calls fail with a
    /// closed error.
    pub fn close(&mut self) {
        self.state = State::Closed;
    }
}

impl<R> fmt::Debug for Retriever<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Open(_) => "Open",
            State::Exhausted => "Exhausted",
            State::Closed => "Closed",
        };
        f.debug_struct("Retriever").field("state", &state).finish()
    }
}
