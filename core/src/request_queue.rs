use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;
use crate::server::SearchServer;
use std::collections::VecDeque;

/// Window length in ticks. Every recorded request advances time by one tick.
pub const MIN_IN_DAY: u64 = 1440;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    timestamp: u64,
    results: usize,
}

/// Runs queries against a server and tracks how many of the most recent
/// [`MIN_IN_DAY`] requests came back empty.
#[derive(Debug)]
pub struct RequestQueue<'s> {
    server: &'s SearchServer,
    requests: VecDeque<QueryResult>,
    no_result_requests: usize,
    current_time: u64,
}

impl<'s> RequestQueue<'s> {
    pub fn new(server: &'s SearchServer) -> Self {
        Self { server, requests: VecDeque::new(), no_result_requests: 0, current_time: 0 }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let result = self.server.find_top_documents(raw_query)?;
        self.record(result.len());
        Ok(result)
    }

    pub fn add_find_request_with_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        let result = self.server.find_top_documents_with_status(raw_query, status)?;
        self.record(result.len());
        Ok(result)
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: FnMut(DocumentId, DocumentStatus, i32) -> bool,
    {
        let result = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(result.len());
        Ok(result)
    }

    /// Empty results among the requests still inside the window.
    pub fn no_result_requests(&self) -> usize { self.no_result_requests }

    pub fn requests_in_window(&self) -> usize { self.requests.len() }

    fn record(&mut self, results: usize) {
        self.current_time += 1;
        while let Some(oldest) = self.requests.front() {
            if self.current_time - oldest.timestamp < MIN_IN_DAY {
                break;
            }
            if oldest.results == 0 {
                self.no_result_requests -= 1;
            }
            self.requests.pop_front();
        }
        self.requests.push_back(QueryResult { timestamp: self.current_time, results });
        if results == 0 {
            self.no_result_requests += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let server = SearchServer::new("and in at").unwrap();
        server.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        server.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        server.add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8]).unwrap();
        server.add_document(4, "big dog sparrow Eugene", DocumentStatus::Actual, &[1, 3, 2]).unwrap();
        server.add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Actual, &[1, 1, 1]).unwrap();
        server
    }

    #[test]
    fn window_evicts_old_empty_requests() {
        let server = server();
        let mut queue = RequestQueue::new(&server);
        for _ in 0..1439 {
            queue.add_find_request("empty request").unwrap();
        }
        assert_eq!(queue.no_result_requests(), 1439);
        queue.add_find_request("curly dog").unwrap();
        assert_eq!(queue.no_result_requests(), 1439);
        queue.add_find_request("big collar").unwrap();
        assert_eq!(queue.no_result_requests(), 1438);
        queue.add_find_request("sparrow").unwrap();
        assert_eq!(queue.no_result_requests(), 1437);
        assert_eq!(queue.requests_in_window(), MIN_IN_DAY as usize);
    }

    #[test]
    fn failed_query_is_not_recorded() {
        let server = server();
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("bad --query").is_err());
        assert_eq!(queue.requests_in_window(), 0);
        queue.add_find_request_with_status("cat", DocumentStatus::Banned).unwrap();
        assert_eq!(queue.no_result_requests(), 1);
        let hits = queue.add_find_request_by("cat", |id, _, _| id == 3).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(queue.no_result_requests(), 1);
    }
}
