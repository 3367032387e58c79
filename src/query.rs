//! Parsing of route requests: whitespace-separated pairs of 1-based node ids.

use std::io::BufRead;

use log::warn;

use crate::{Error, Result};

/// A single route request with 0-based node ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query {
    pub source: usize,
    pub target: usize,
}

impl Query {
    pub fn new(source: usize, target: usize) -> Self {
        Query { source, target }
    }
}

/// Iterator over the pairs of a query stream.
///
/// Yields `Err(Error::InvalidQueryNode)` for a pair naming a node outside
/// `1..=node_count` (the source is checked first) and keeps going; stops at
/// end of input, at the first token that is not an unsigned integer (bytes
/// that are not UTF-8 included), or at a dangling source without a target.
/// Read failures are yielded once as `Err(Error::Io)` and end the iteration.
pub struct QueryReader<R> {
    input: R,
    node_count: usize,
    pending: Vec<Vec<u8>>,
    finished: bool,
}

impl<R: BufRead> QueryReader<R> {
    pub fn new(input: R, node_count: usize) -> Self {
        QueryReader {
            input,
            node_count,
            pending: Vec::new(),
            finished: false,
        }
    }

    /// Next whitespace-separated token, refilling line by line
    fn next_token(&mut self) -> Result<Option<Vec<u8>>> {
        while self.pending.is_empty() {
            let mut line = Vec::new();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            self.pending = line
                .split(|b| b.is_ascii_whitespace())
                .filter(|token| !token.is_empty())
                .rev()
                .map(<[u8]>::to_vec)
                .collect();
        }
        Ok(self.pending.pop())
    }

    fn next_id(&mut self) -> Result<Option<u64>> {
        let token = match self.next_token()? {
            Some(token) => token,
            None => return Ok(None),
        };
        let id = std::str::from_utf8(&token)
            .ok()
            .and_then(|text| text.parse::<u64>().ok());
        if id.is_none() {
            warn!(
                "Stopping at malformed query token {:?}",
                String::from_utf8_lossy(&token)
            );
        }
        Ok(id)
    }

    /// Converts a 1-based id into a 0-based index, if it names a node
    fn normalize(&self, id: u64) -> Option<usize> {
        if id == 0 || id > self.node_count as u64 {
            None
        } else {
            Some(id as usize - 1)
        }
    }
}

impl<R: BufRead> Iterator for QueryReader<R> {
    type Item = Result<Query>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let ids = match self.next_id() {
            Ok(Some(s)) => self.next_id().map(|t| t.map(|t| (s, t))),
            other => other.map(|_| None),
        };
        let (s, t) = match ids {
            Ok(Some(pair)) => pair,
            Ok(None) => {
                self.finished = true;
                return None;
            }
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };

        let source = match self.normalize(s) {
            Some(source) => source,
            None => {
                warn!("Start node {} is invalid", s);
                return Some(Err(Error::InvalidQueryNode { role: "Start", id: s }));
            }
        };
        let target = match self.normalize(t) {
            Some(target) => target,
            None => {
                warn!("Target node {} is invalid", t);
                return Some(Err(Error::InvalidQueryNode { role: "Target", id: t }));
            }
        };

        Some(Ok(Query { source, target }))
    }
}
