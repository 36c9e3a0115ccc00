// src/matches/tests/validators_tests.rs

#[cfg(test)]
mod tests {
    use super::super::doubles::{sample_match, sample_side, InMemoryMatches, InMemoryTeams};
    use crate::chain::{FailureKind, TracingObserver, CHAIN_SUCCESS_MESSAGE};
    use crate::common::InfrastructureFault;
    use crate::matches::commands::{FinalizeMatchCommand, ScoreEntryCommand};
    use crate::matches::validators::*;
    use std::sync::Arc;

    fn store() -> Arc<InMemoryMatches> {
        InMemoryMatches::with(vec![
            sample_match(1, "in_progress"),
            sample_match(2, "finished"),
            sample_match(3, "cancelled"),
            sample_match(4, "postponed"),
            sample_match(5, "in_progress"),
            sample_match(6, "scheduled"),
        ])
    }

    /// Matches 5 and 6 are missing sides
    fn teams() -> Arc<InMemoryTeams> {
        let mut rows: Vec<_> = [1, 2, 3, 4]
            .into_iter()
            .flat_map(|id| [sample_side(id, true), sample_side(id, false)])
            .collect();
        rows.push(sample_side(6, true));
        InMemoryTeams::with(rows)
    }

    fn score(match_id: i64, home: Option<i32>, away: Option<i32>) -> ScoreEntryCommand {
        ScoreEntryCommand {
            match_id,
            home_score: home,
            away_score: away,
            note: None,
            author_id: None,
        }
    }

    fn finalize(
        match_id: i64,
        home: Option<i32>,
        away: Option<i32>,
        status: Option<&str>,
        outcome: Option<&str>,
    ) -> FinalizeMatchCommand {
        FinalizeMatchCommand {
            match_id,
            home_score: home,
            away_score: away,
            status: status.map(str::to_string),
            outcome: outcome.map(str::to_string),
            note: None,
            author_id: None,
        }
    }

    // ========================================================================
    // Score Entry
    // ========================================================================

    #[tokio::test]
    async fn test_score_entry_accepts_valid_score() {
        let chain = score_entry_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain.handle(&score(1, Some(2), Some(1))).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.message(), CHAIN_SUCCESS_MESSAGE);
        assert_eq!(result.originating_handler(), None);
    }

    #[tokio::test]
    async fn test_score_entry_rejects_negative_score() {
        let chain = score_entry_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain.handle(&score(1, Some(-1), Some(0))).await.unwrap();

        assert!(!result.is_success());
        assert_eq!(result.kind(), Some(FailureKind::InvalidArgument));
        assert_eq!(result.originating_handler(), Some("ScoreNonNegative"));
    }

    #[tokio::test]
    async fn test_score_entry_rejects_unknown_match_at_head() {
        let chain = score_entry_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain.handle(&score(404, Some(1), Some(0))).await.unwrap();

        assert_eq!(result.kind(), Some(FailureKind::NotFound));
        assert_eq!(result.originating_handler(), Some("MatchExists"));
    }

    #[tokio::test]
    async fn test_score_entry_rejects_closed_matches() {
        let chain = score_entry_chain(store(), teams(), Arc::new(TracingObserver));

        for match_id in [2, 3] {
            let result = chain.handle(&score(match_id, Some(1), None)).await.unwrap();
            assert_eq!(result.kind(), Some(FailureKind::InvalidState));
            assert_eq!(result.originating_handler(), Some("ScoreEntryAllowed"));
        }
    }

    #[tokio::test]
    async fn test_score_entry_rejects_unrecognised_stored_status() {
        let chain = score_entry_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain.handle(&score(4, Some(1), Some(1))).await.unwrap();

        assert_eq!(result.kind(), Some(FailureKind::InvalidState));
    }

    #[tokio::test]
    async fn test_score_entry_requires_some_score() {
        let chain = score_entry_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain.handle(&score(1, None, None)).await.unwrap();

        assert_eq!(result.kind(), Some(FailureKind::InvalidArgument));
        assert!(chain.handle(&score(1, None, Some(3))).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_score_entry_rejects_match_without_both_sides() {
        let chain = score_entry_chain(store(), teams(), Arc::new(TracingObserver));

        for match_id in [5, 6] {
            let result = chain.handle(&score(match_id, Some(1), Some(0))).await.unwrap();
            assert_eq!(result.kind(), Some(FailureKind::InvalidState));
            assert_eq!(result.originating_handler(), Some("MatchHasBothSides"));
        }
    }

    #[tokio::test]
    async fn test_score_entry_surfaces_lookup_fault() {
        let chain = score_entry_chain(
            InMemoryMatches::failing(),
            teams(),
            Arc::new(TracingObserver),
        );

        let outcome = chain.handle(&score(1, Some(1), Some(1))).await;

        assert!(matches!(outcome, Err(InfrastructureFault::Unavailable(_))));
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    #[tokio::test]
    async fn test_finalize_rejects_contradicting_outcome() {
        let chain = finalization_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain
            .handle(&finalize(1, Some(3), Some(1), Some("finished"), Some("away win")))
            .await
            .unwrap();

        assert_eq!(result.kind(), Some(FailureKind::Inconsistent));
        assert_eq!(result.originating_handler(), Some("OutcomeMatchesScore"));
    }

    #[tokio::test]
    async fn test_finalize_accepts_consistent_outcome() {
        let chain = finalization_chain(store(), teams(), Arc::new(TracingObserver));

        let home_win = chain
            .handle(&finalize(1, Some(3), Some(1), Some("finished"), Some("home win")))
            .await
            .unwrap();
        let draw = chain
            .handle(&finalize(1, Some(2), Some(2), None, Some("draw")))
            .await
            .unwrap();

        assert!(home_win.is_success());
        assert!(draw.is_success());
    }

    #[tokio::test]
    async fn test_finalize_rejects_match_without_teams() {
        let chain = finalization_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain
            .handle(&finalize(5, Some(3), Some(1), Some("finished"), Some("home win")))
            .await
            .unwrap();

        assert!(!result.is_success());
        assert_eq!(result.kind(), Some(FailureKind::InvalidState));
        assert_eq!(result.originating_handler(), Some("MatchHasBothSides"));
    }

    #[tokio::test]
    async fn test_finalize_rejects_already_finished_match() {
        let chain = finalization_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain
            .handle(&finalize(2, Some(1), Some(0), None, None))
            .await
            .unwrap();

        assert_eq!(result.kind(), Some(FailureKind::InvalidState));
        assert_eq!(result.originating_handler(), Some("NotAlreadyFinalized"));
    }

    #[tokio::test]
    async fn test_finalize_requires_both_scores() {
        let chain = finalization_chain(store(), teams(), Arc::new(TracingObserver));

        let missing = chain
            .handle(&finalize(1, Some(1), None, None, None))
            .await
            .unwrap();
        let negative = chain
            .handle(&finalize(1, Some(1), Some(-2), None, None))
            .await
            .unwrap();

        assert_eq!(missing.originating_handler(), Some("ScoresPresent"));
        assert_eq!(negative.kind(), Some(FailureKind::InvalidArgument));
    }

    #[tokio::test]
    async fn test_finalize_rejects_non_terminal_status() {
        let chain = finalization_chain(store(), teams(), Arc::new(TracingObserver));

        let live = chain
            .handle(&finalize(1, Some(1), Some(0), Some("in_progress"), None))
            .await
            .unwrap();
        let bogus = chain
            .handle(&finalize(1, Some(1), Some(0), Some("abandoned"), None))
            .await
            .unwrap();

        assert_eq!(live.originating_handler(), Some("FinalStatusValid"));
        assert_eq!(bogus.kind(), Some(FailureKind::InvalidArgument));
    }

    #[tokio::test]
    async fn test_cancelled_match_skips_outcome_check() {
        let chain = finalization_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain
            .handle(&finalize(1, Some(0), Some(0), Some("cancelled"), Some("home win")))
            .await
            .unwrap();

        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_unknown_outcome_label_is_invalid_argument() {
        let chain = finalization_chain(store(), teams(), Arc::new(TracingObserver));

        let result = chain
            .handle(&finalize(1, Some(1), Some(0), None, Some("victory")))
            .await
            .unwrap();

        assert_eq!(result.kind(), Some(FailureKind::InvalidArgument));
        assert_eq!(result.originating_handler(), Some("OutcomeMatchesScore"));
    }

    #[test]
    fn test_chains_link_handlers_in_documented_order() {
        let score_chain = score_entry_chain(store(), teams(), Arc::new(TracingObserver));
        let final_chain = finalization_chain(store(), teams(), Arc::new(TracingObserver));

        assert_eq!(score_chain.name(), SCORE_ENTRY_CHAIN);
        assert_eq!(
            final_chain.handler_names(),
            vec![
                "MatchExists",
                "NotAlreadyFinalized",
                "MatchHasBothSides",
                "ScoresPresent",
                "FinalStatusValid",
                "OutcomeMatchesScore"
            ]
        );
    }
}
