use crate::error::MetadataError;
use crate::record::VideoRecord;

/// Records aligned 1:1 with the requested ids; `None` where the API returned nothing.
pub type Batch = Vec<Option<VideoRecord>>;

/// Lines `returned` up against `requested`.
///
/// The API silently drops ids it cannot resolve (deleted, private, malformed)
/// but keeps the rest in request order, so `returned` must be an ordered
/// subsequence of `requested`. The output always has `requested.len()` entries.
pub fn reconcile<S: AsRef<str>>(
    requested: &[S],
    returned: Vec<VideoRecord>,
) -> Result<Batch, MetadataError> {
    if returned.is_empty() {
        return Ok(vec![None; requested.len()]);
    }

    let mut batch: Batch = Vec::with_capacity(requested.len());
    let mut pending = requested.iter().map(AsRef::as_ref);

    for record in returned {
        let Some(returned_id) = record.id.clone() else {
            return Err(MetadataError::MissingField {
                field: "id",
                index: batch.len(),
            });
        };

        loop {
            let Some(requested_id) = pending.next() else {
                tracing::error!(
                    "[reconcile] Returned id {} not found in remaining request ({} of {} consumed)",
                    returned_id,
                    batch.len(),
                    requested.len()
                );
                return Err(MetadataError::UnmatchedId(returned_id));
            };
            if requested_id == returned_id {
                batch.push(Some(record));
                break;
            }
            batch.push(None);
        }
    }

    batch.extend(pending.map(|_| None));
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str) -> VideoRecord {
        VideoRecord {
            id: Some(id.to_string()),
            snippet: None,
        }
    }

    fn ids(batch: &Batch) -> Vec<Option<&str>> {
        batch
            .iter()
            .map(|r| r.as_ref().and_then(|r| r.id.as_deref()))
            .collect()
    }

    #[test]
    fn test_empty_response_fills_with_none() {
        let batch = reconcile(&["a", "b", "c"], Vec::new()).unwrap();
        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(Option::is_none));
    }

    #[test]
    fn test_empty_request_and_response() {
        let batch = reconcile::<&str>(&[], Vec::new()).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_all_returned() {
        let batch = reconcile(&["a", "b", "c"], vec![rec("a"), rec("b"), rec("c")]).unwrap();
        assert_eq!(ids(&batch), vec![Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn test_gap_in_middle() {
        let batch = reconcile(&["A", "B", "C"], vec![rec("A"), rec("C")]).unwrap();
        assert_eq!(ids(&batch), vec![Some("A"), None, Some("C")]);
    }

    #[test]
    fn test_gaps_at_edges() {
        let batch = reconcile(&["a", "b", "c", "d", "e"], vec![rec("b"), rec("d")]).unwrap();
        assert_eq!(ids(&batch), vec![None, Some("b"), None, Some("d"), None]);
    }

    #[test]
    fn test_trailing_gap_after_last_match() {
        let batch = reconcile(&["a", "b", "c"], vec![rec("a")]).unwrap();
        assert_eq!(ids(&batch), vec![Some("a"), None, None]);
    }

    #[test]
    fn test_owned_string_request() {
        let requested = vec!["x".to_string(), "y".to_string()];
        let batch = reconcile(&requested, vec![rec("y")]).unwrap();
        assert_eq!(ids(&batch), vec![None, Some("y")]);
    }

    #[test]
    fn test_repeated_request_id_matches_first_occurrence() {
        let batch = reconcile(&["a", "a", "b"], vec![rec("a"), rec("b")]).unwrap();
        assert_eq!(ids(&batch), vec![Some("a"), None, Some("b")]);
    }

    #[test]
    fn test_present_entries_match_requested_position() {
        let requested = ["v1", "v2", "v3", "v4", "v5", "v6"];
        let returned = vec![rec("v2"), rec("v3"), rec("v6")];
        let batch = reconcile(&requested, returned).unwrap();
        assert_eq!(batch.len(), requested.len());
        for (i, entry) in batch.iter().enumerate() {
            if let Some(record) = entry {
                assert_eq!(record.id.as_deref(), Some(requested[i]));
            }
        }
        assert_eq!(batch.iter().filter(|e| e.is_some()).count(), 3);
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let err = reconcile(&["a", "b", "c"], vec![rec("c"), rec("a")]).unwrap_err();
        assert!(matches!(err, MetadataError::UnmatchedId(id) if id == "a"));
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let err = reconcile(&["a", "b"], vec![rec("zzz")]).unwrap_err();
        assert!(matches!(err, MetadataError::UnmatchedId(id) if id == "zzz"));
    }

    #[test]
    fn test_duplicate_returned_id_is_rejected() {
        let err = reconcile(&["a", "b"], vec![rec("a"), rec("a")]).unwrap_err();
        assert!(matches!(err, MetadataError::UnmatchedId(id) if id == "a"));
    }

    #[test]
    fn test_returned_record_without_id() {
        let err = reconcile(&["a", "b"], vec![rec("a"), VideoRecord::default()]).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::MissingField { field: "id", index: 1 }
        ));
    }
}
