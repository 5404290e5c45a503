use crate::document::Document;
use crate::error::Result;
use crate::server::SearchServer;
use rayon::prelude::*;

/// Run `find_top_documents` for every query in parallel. Results are in
/// query order; any invalid query fails the whole batch.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries.par_iter().map(|query| server.find_top_documents(query.as_ref())).collect()
}

/// Like [`process_queries`], with every result list concatenated in query
/// order. Documents found by several queries appear once per query.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    fn server() -> SearchServer {
        let server = SearchServer::new("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in (1..).zip(texts) {
            server.add_document(id, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        server
    }

    #[test]
    fn results_follow_query_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let results = process_queries(&server, &queries).unwrap();
        let sizes: Vec<usize> = results.iter().map(Vec::len).collect();
        assert_eq!(sizes, [3, 5, 2]);
        for (query, expected) in queries.iter().zip(&results) {
            assert_eq!(&server.find_top_documents(query).unwrap(), expected);
        }
    }

    #[test]
    fn joined_keeps_grouping_and_duplicates() {
        let server = server();
        let queries = vec!["curly hair".to_string(), "curly".to_string()];
        let joined = process_queries_joined(&server, &queries).unwrap();
        let ids: Vec<i32> = joined.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[..2], ids[2..]);
    }

    #[test]
    fn invalid_query_fails_batch() {
        let server = server();
        assert!(process_queries(&server, &["rat", "--rat"]).is_err());
    }
}
