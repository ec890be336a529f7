use crate::domain::request::Request;
use crate::error::{LedgerError, Result};
use std::io::Read;

/// Reads requests from a CSV source with an `op, id, name, amount` header.
///
/// `op` is one of `create`, `deposit`, `withdraw` or `balance`, and only the
/// fields that operation needs have to be filled in: `name` for `create`, `id`
/// for everything else, `amount` for `deposit` and `withdraw`. Empty fields
/// and missing trailing fields decode as absent; whitespace is trimmed.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<Request>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
