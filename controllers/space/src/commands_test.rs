//! Unit tests for CLI command handlers

#[cfg(test)]
mod tests {
    use crate::commands;
    use crate::error::ControllerError;
    use crate::store::{FileStateStore, StoredSpace};
    use crate::test_utils::*;
    use heroku_client::{InjectedFailure, MockOperation, SpaceState};
    use space_state::SpaceDesiredState;

    fn temp_store() -> (tempfile::TempDir, FileStateStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::new(dir.path().join("space-state.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_apply_creates_and_records_space() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let observed = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();

        let record = store.load().unwrap();
        assert_eq!(record.id.as_deref(), Some(observed.id.as_str()));
        assert_eq!(record.observed, Some(observed));
        assert_eq!(mock.call_count(MockOperation::CreateSpace), 1);
    }

    #[tokio::test]
    async fn test_apply_twice_is_a_no_op() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let first = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        let second = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.call_count(MockOperation::CreateSpace), 1);
        assert_eq!(mock.call_count(MockOperation::UpdateSpace), 0);
    }

    #[tokio::test]
    async fn test_apply_renames_in_place() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let created = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        let renamed = commands::apply(&controller, &store, create_test_desired("tftest-renamed")).await.unwrap();

        assert_eq!(renamed.id, created.id);
        assert_eq!(renamed.name, "tftest-renamed");
        assert_eq!(mock.call_count(MockOperation::UpdateSpace), 1);
    }

    #[tokio::test]
    async fn test_apply_refuses_force_new_change() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        let moved = SpaceDesiredState::new("tftest-abc", "my-org", "eu");
        let err = commands::apply(&controller, &store, moved).await.unwrap_err();

        match err {
            ControllerError::ReplacementRequired { fields, .. } => assert_eq!(fields, "region"),
            other => panic!("expected ReplacementRequired, got {other:?}"),
        }
        assert_eq!(mock.call_count(MockOperation::UpdateSpace), 0);
    }

    #[tokio::test]
    async fn test_apply_recreates_space_deleted_out_of_band() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let first = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        mock.remove_space(&first.id);

        let second = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();

        assert_ne!(second.id, first.id);
        assert_eq!(store.load().unwrap().id, Some(second.id));
    }

    #[tokio::test]
    async fn test_apply_records_id_on_partial_create() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();
        mock.fail_next(MockOperation::GetSpace, InjectedFailure::Api {
            status: 503,
            message: "service unavailable".to_string(),
        });

        let err = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap_err();
        let id = err.created_id().unwrap().to_string();

        let record = store.load().unwrap();
        assert_eq!(record.id.as_deref(), Some(id.as_str()));
        assert_eq!(record.observed, None);

        // Refresh completes the record
        let observed = commands::refresh(&controller, &store).await.unwrap().unwrap();
        assert_eq!(observed.id, id);
        assert_eq!(store.load().unwrap().observed, Some(observed));
    }

    #[tokio::test]
    async fn test_refresh_picks_up_allocation() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let created = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        mock.allocate_space(&created.id, test_nat_sources());

        let refreshed = commands::refresh(&controller, &store).await.unwrap().unwrap();

        assert_eq!(refreshed.nat_sources, test_nat_sources());
        assert_eq!(store.load().unwrap().observed.unwrap().nat_sources, test_nat_sources());
    }

    #[tokio::test]
    async fn test_refresh_clears_state_when_space_is_gone() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let created = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        mock.remove_space(&created.id);

        assert_eq!(commands::refresh(&controller, &store).await.unwrap(), None);
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_keeps_record_when_nat_lookup_fails() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let created = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        mock.allocate_space(&created.id, test_nat_sources());
        mock.fail_next(MockOperation::GetSpaceNat, InjectedFailure::NotFound("nat not found".to_string()));

        let err = commands::refresh(&controller, &store).await.unwrap_err();

        assert!(!err.is_not_found());
        assert!(mock.space(&created.id).is_some());
        let record = store.load().unwrap();
        assert_eq!(record.id, Some(created.id.clone()));
        assert_eq!(record.observed, Some(created));
    }

    #[tokio::test]
    async fn test_apply_does_not_recreate_when_nat_lookup_fails() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let created = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        mock.allocate_space(&created.id, test_nat_sources());
        mock.fail_next(MockOperation::GetSpaceNat, InjectedFailure::NotFound("nat not found".to_string()));

        assert!(commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.is_err());
        assert_eq!(mock.call_count(MockOperation::CreateSpace), 1);
        assert_eq!(store.load().unwrap().id, Some(created.id));
    }

    #[tokio::test]
    async fn test_refresh_without_record_fails() {
        let (controller, _mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let err = commands::refresh(&controller, &store).await.unwrap_err();

        assert!(matches!(err, ControllerError::Store(_)));
    }

    #[tokio::test]
    async fn test_destroy_deletes_and_clears() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();

        let created = commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        let id = commands::destroy(&controller, &store).await.unwrap();

        assert_eq!(id, created.id);
        assert!(mock.space(&created.id).is_none());
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_adopts_space_into_empty_state() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();
        seed_space(&mock, "sp_123", "tftest-abc", SpaceState::Allocated);
        mock.set_nat_sources("sp_123", test_nat_sources());

        let observed = commands::import(&controller, &store, "sp_123").await.unwrap();
        let record = store.load().unwrap();

        assert_eq!(record.id.as_deref(), Some("sp_123"));
        assert_eq!(record.desired, Some(create_test_desired("tftest-abc")));
        assert_eq!(record.observed, Some(observed));

        // Applying the imported desired state changes nothing
        commands::apply(&controller, &store, create_test_desired("tftest-abc")).await.unwrap();
        assert_eq!(mock.call_count(MockOperation::CreateSpace), 0);
        assert_eq!(mock.call_count(MockOperation::UpdateSpace), 0);
    }

    #[tokio::test]
    async fn test_import_refuses_when_state_is_occupied() {
        let (controller, mock) = create_test_controller();
        let (_dir, store) = temp_store();
        seed_space(&mock, "sp_123", "tftest-abc", SpaceState::Allocated);
        store
            .save(&StoredSpace {
                id: Some("sp_other".to_string()),
                ..StoredSpace::default()
            })
            .unwrap();

        let err = commands::import(&controller, &store, "sp_123").await.unwrap_err();

        assert!(matches!(err, ControllerError::Store(_)));
        assert!(mock.calls().is_empty());
    }
}
