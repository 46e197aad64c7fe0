use std::sync::Arc;

use digitize::domain::{ExtractedField, ExtractionResult, Provenance};

fn invoice_result() -> ExtractionResult {
    ExtractionResult::from_fields([
        ExtractedField::machine("Invoice Number", "INV-2024-001", 0.97),
        ExtractedField::machine("Total Amount", "$1,234.56", 0.97),
        ExtractedField::machine("Vendor Name", "Acme Corporation", 0.97),
    ])
}

#[test]
fn given_result_when_setting_field_then_only_that_field_changes() {
    let before = invoice_result();

    let after = before.set_field("Total Amount", "$99.00");

    let total = after.get("Total Amount").unwrap();
    assert_eq!(total.value, "$99.00");
    assert_eq!(total.provenance, Provenance::Human);
    assert_eq!(total.confidence, Some(0.97));

    for name in ["Invoice Number", "Vendor Name"] {
        assert!(Arc::ptr_eq(
            before.entry(name).unwrap(),
            after.entry(name).unwrap()
        ));
    }
    assert_eq!(before.get("Total Amount").unwrap().value, "$1,234.56");
}

#[test]
fn given_result_when_setting_unknown_field_then_appends_human_entry() {
    let after = invoice_result().set_field("Notes", "paid");

    assert_eq!(after.len(), 4);
    let notes = after.get("Notes").unwrap();
    assert!(notes.edited_by_human());
    assert_eq!(notes.confidence, None);
}

#[test]
fn given_result_when_reset_then_is_empty() {
    let result = invoice_result().reset();

    assert!(result.is_empty());
    assert_eq!(result.iter().count(), 0);
}

#[test]
fn given_out_of_range_confidence_when_creating_machine_field_then_clamps() {
    assert_eq!(ExtractedField::machine("a", "b", 1.7).confidence, Some(1.0));
    assert_eq!(ExtractedField::machine("a", "b", -0.2).confidence, Some(0.0));
}

#[test]
fn given_entries_out_of_order_when_arranging_then_follows_names_and_shares_entries() {
    let before = ExtractionResult::empty()
        .set_field("Total Amount", "$99.00")
        .set_field("Notes", "paid")
        .set_field("Invoice Number", "INV-7");

    let after = before.arranged(&["Invoice Number", "Vendor Name", "Total Amount"]);

    let names: Vec<_> = after.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Invoice Number", "Total Amount", "Notes"]);
    assert!(Arc::ptr_eq(
        before.entry("Total Amount").unwrap(),
        after.entry("Total Amount").unwrap()
    ));
}
