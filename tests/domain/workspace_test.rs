use digitize::domain::{
    ExtractedField, ExtractionFailure, ExtractionResult, ExtractionStatus, TemplateId, Workspace,
    WorkspaceCommand, WorkspaceError,
};

use crate::helpers::png_document;

fn staged() -> Workspace {
    Workspace::new(TemplateId::new())
        .apply(WorkspaceCommand::StageDocument(png_document()))
        .unwrap()
}

fn completed(run: u64) -> WorkspaceCommand {
    WorkspaceCommand::CompleteExtraction {
        run,
        result: ExtractionResult::from_fields([ExtractedField::machine(
            "Total Amount",
            "$1,234.56",
            0.97,
        )]),
    }
}

#[test]
fn given_new_workspace_when_created_then_idle_and_empty() {
    let workspace = Workspace::new(TemplateId::new());

    assert_eq!(workspace.status, ExtractionStatus::Idle);
    assert!(workspace.document.is_none());
    assert!(workspace.result.is_empty());
    assert_eq!(workspace.run, 0);
}

#[test]
fn given_no_document_when_beginning_extraction_then_rejects() {
    let result = Workspace::new(TemplateId::new()).apply(WorkspaceCommand::BeginExtraction);

    assert_eq!(result.unwrap_err(), WorkspaceError::NoDocument);
}

#[test]
fn given_staged_document_when_extraction_completes_then_ready_with_result() {
    let pending = staged().apply(WorkspaceCommand::BeginExtraction).unwrap();
    assert_eq!(pending.status, ExtractionStatus::Pending);
    assert_eq!(pending.run, 1);

    let ready = pending.apply(completed(1)).unwrap();

    assert_eq!(ready.status, ExtractionStatus::Ready);
    assert_eq!(ready.result.get("Total Amount").unwrap().value, "$1,234.56");
}

#[test]
fn given_pending_extraction_when_beginning_again_then_rejects_in_flight() {
    let pending = staged().apply(WorkspaceCommand::BeginExtraction).unwrap();

    assert_eq!(
        pending.apply(WorkspaceCommand::BeginExtraction).unwrap_err(),
        WorkspaceError::ExtractionInFlight
    );
    assert_eq!(
        pending
            .apply(WorkspaceCommand::SetField {
                name: "Total Amount".to_string(),
                value: "$1".to_string(),
                field_order: Vec::new(),
            })
            .unwrap_err(),
        WorkspaceError::ExtractionInFlight
    );
}

#[test]
fn given_newer_run_when_old_run_completes_then_rejects_stale_outcome() {
    let first = staged().apply(WorkspaceCommand::BeginExtraction).unwrap();
    let second = first
        .apply(WorkspaceCommand::CancelExtraction)
        .unwrap()
        .apply(WorkspaceCommand::BeginExtraction)
        .unwrap();
    assert_eq!(second.run, 2);

    assert_eq!(
        second.apply(completed(1)).unwrap_err(),
        WorkspaceError::StaleRun(1)
    );
}

#[test]
fn given_pending_extraction_when_cancelled_then_returns_to_idle() {
    let idle = staged()
        .apply(WorkspaceCommand::BeginExtraction)
        .unwrap()
        .apply(WorkspaceCommand::CancelExtraction)
        .unwrap();

    assert_eq!(idle.status, ExtractionStatus::Idle);
    assert_eq!(
        idle.apply(completed(1)).unwrap_err(),
        WorkspaceError::NotInFlight
    );
}

#[test]
fn given_failed_extraction_when_reset_then_clears_error_and_result() {
    let failed = staged()
        .apply(WorkspaceCommand::BeginExtraction)
        .unwrap()
        .apply(WorkspaceCommand::FailExtraction {
            run: 1,
            failure: ExtractionFailure {
                message: "extraction timed out".to_string(),
                retryable: true,
            },
        })
        .unwrap();
    assert_eq!(failed.status, ExtractionStatus::Failed);
    assert!(failed.last_error.as_ref().unwrap().retryable);

    let reset = failed.apply(WorkspaceCommand::Reset).unwrap();

    assert_eq!(reset.status, ExtractionStatus::Idle);
    assert!(reset.last_error.is_none());
    assert!(reset.result.is_empty());
    assert!(reset.document.is_some());
}

#[test]
fn given_field_order_when_setting_fields_after_reset_then_result_keeps_template_order() {
    let order = vec!["Invoice Number".to_string(), "Total Amount".to_string()];
    let set = |name: &str| WorkspaceCommand::SetField {
        name: name.to_string(),
        value: "x".to_string(),
        field_order: order.clone(),
    };

    let workspace = staged()
        .apply(WorkspaceCommand::Reset)
        .unwrap()
        .apply(set("Total Amount"))
        .unwrap()
        .apply(set("Invoice Number"))
        .unwrap();

    let names: Vec<_> = workspace.result.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Invoice Number", "Total Amount"]);
}

#[test]
fn given_statuses_when_serializing_then_uses_upper_case_names_matching_display() {
    for (status, name) in [
        (ExtractionStatus::Idle, "IDLE"),
        (ExtractionStatus::Pending, "PENDING"),
        (ExtractionStatus::Ready, "READY"),
        (ExtractionStatus::Failed, "FAILED"),
    ] {
        assert_eq!(serde_json::to_value(status).unwrap(), name);
        assert_eq!(status.to_string(), name);
    }
}
