//! End-to-end import tests: text and files through detection, preparation
//! and planning.

use std::io::Write;

use crm_ingest::{
    ImportOptions, ImportProgress, IngestError, KnownPhones, PhoneFormat, SkipReason,
    import_file, import_text, plan_import, prepare_customers,
};
use crm_map::HeaderMatcher;
use crm_model::{CanonicalField, IssueKind};
use proptest::prelude::*;
use tempfile::NamedTempFile;

const SHOP_EXPORT: &str = "\u{feff}Customer Name,Mobile Number,Sex,Town,Loyalty,Birthday,Amount Spent\r\n\
ASHA JUMA,0712 345 678,F,dsm,gold,12-dec,150000\r\n\
\r\n\
John Mushi,\"0755-111-222\",M,moro,,jan-5,0\r\n\
Neema,0712345678,female,Arusha,diamond,,\r\n\
,0788000000,,,,,\r\n";

fn write_temp(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn shop_export_detects_and_projects() {
    let report = import_text(SHOP_EXPORT, &HeaderMatcher::builtin(), None).unwrap();

    assert_eq!(report.headers[0], "Customer Name");
    assert_eq!(report.detected_columns.column(CanonicalField::Name), Some(0));
    assert_eq!(report.detected_columns.column(CanonicalField::Phone), Some(1));
    assert_eq!(report.detected_columns.column(CanonicalField::Gender), Some(2));
    assert_eq!(report.detected_columns.column(CanonicalField::City), Some(3));
    assert_eq!(report.detected_columns.column(CanonicalField::Birthday), Some(5));
    assert_eq!(report.row_count(), 4);
    assert_eq!(report.data[1].get(CanonicalField::Phone), "0755-111-222");
    assert!(report.errors.is_empty());
}

#[test]
fn shop_export_prepares_and_plans() {
    let report = import_text(SHOP_EXPORT, &HeaderMatcher::builtin(), None).unwrap();
    let prepared = prepare_customers(&report, &PhoneFormat::default());

    // The nameless row is reported but not prepared.
    assert_eq!(prepared.rows.len(), 3);
    assert!(
        prepared
            .issues
            .iter()
            .any(|issue| issue.row == 5 && issue.kind == IssueKind::NameRequired)
    );

    let asha = &prepared.rows[0].draft;
    assert_eq!(asha.name, "Asha Juma");
    assert_eq!(asha.phone, "+255712345678");
    assert_eq!(asha.city, "Dar es Salaam");
    assert_eq!(asha.birth_month, "December");
    assert_eq!(asha.birth_day, "12");

    assert_eq!(prepared.duplicates.len(), 1);
    assert_eq!(prepared.duplicates[0].rows, vec![2, 4]);

    let known = KnownPhones::from_raw(["+255 755 111 222"], &PhoneFormat::default());
    let plan = plan_import(&prepared, &known);
    let created: Vec<usize> = plan.to_create.iter().map(|planned| planned.row).collect();
    assert_eq!(created, vec![2]);
    assert_eq!(plan.skipped_existing(), 1);
    // Row 4 repeats row 2's phone and also has an invalid loyalty level.
    assert!(matches!(
        plan.skipped[1].reason,
        SkipReason::Invalid { .. }
    ));
}

#[test]
fn exact_header_match_wins() {
    let report = import_text(
        "Full Name,Phone Number\nAsha,0712345678\n",
        &HeaderMatcher::builtin(),
        None,
    )
    .unwrap();
    assert_eq!(report.detected_columns.column(CanonicalField::Name), Some(0));
    assert_eq!(report.detected_columns.column(CanonicalField::Phone), Some(1));
}

#[test]
fn no_match_still_yields_one_record_per_row() {
    let mut notices = Vec::new();
    let mut sink = |notice: &ImportProgress| notices.push(*notice);
    let report = import_text(
        "xx,yy,zz\n1,2,3\n4,5,6\n",
        &HeaderMatcher::builtin(),
        Some(&mut sink),
    )
    .unwrap();

    assert!(report.detected_columns.is_empty());
    assert_eq!(report.row_count(), 2);
    assert!(report.data.iter().all(|record| record.is_blank()));
    assert_eq!(notices, vec![ImportProgress::NoneDetected]);
}

#[test]
fn header_without_data_fails() {
    let err = import_text("Name,Phone\n", &HeaderMatcher::builtin(), None).unwrap_err();
    assert!(err.to_string().contains("header row and one data row"));
}

#[test]
fn import_file_reads_and_imports() {
    let file = write_temp("Name,Phone\nAsha,0712345678\n");
    let report = import_file(
        file.path(),
        &ImportOptions::default(),
        &HeaderMatcher::builtin(),
        None,
    )
    .unwrap();
    assert_eq!(report.row_count(), 1);
    assert_eq!(report.data[0].get(CanonicalField::Name), "Asha");
}

#[test]
fn import_file_respects_size_limit() {
    let file = write_temp("Name,Phone\nAsha,0712345678\n");
    let options = ImportOptions::new().with_max_file_size(10);
    let err = import_file(file.path(), &options, &HeaderMatcher::builtin(), None).unwrap_err();
    assert!(matches!(err, IngestError::FileTooLarge { .. }));
}

#[test]
fn known_phones_load_named_column() {
    let file = write_temp("id,Phone,name\n1,0712 345 678,Asha\n2,+255755111222,Juma\n");
    let known = KnownPhones::load(file.path(), &PhoneFormat::default()).unwrap();
    assert_eq!(known.len(), 2);
    assert!(known.contains("+255712345678"));
    assert!(known.contains("+255755111222"));
}

#[test]
fn known_phones_load_single_unnamed_column() {
    let file = write_temp("0712345678\n0755111222\n");
    let known = KnownPhones::load(file.path(), &PhoneFormat::default()).unwrap();
    assert_eq!(known.len(), 2);
    assert!(known.contains("+255712345678"));
}

#[test]
fn known_phones_single_column_with_header_name() {
    let file = write_temp("Phone Number\n0712345678\n");
    let known = KnownPhones::load(file.path(), &PhoneFormat::default()).unwrap();
    assert_eq!(known.len(), 1);
    assert!(known.contains("+255712345678"));
    assert!(!known.contains("255PhoneNumber"));
}

#[test]
fn mixed_phone_spellings_are_one_customer() {
    let report = import_text(
        "Name,Phone\nJuma,0755111222\nJuma M,255755111222\nAsha,+255 712 345 678\nAsha J,712345678\n",
        &HeaderMatcher::builtin(),
        None,
    )
    .unwrap();
    let prepared = prepare_customers(&report, &PhoneFormat::default());
    assert_eq!(prepared.duplicates.len(), 2);
    assert_eq!(prepared.duplicates[0].rows, vec![2, 3]);
    assert_eq!(prepared.duplicates[1].rows, vec![4, 5]);

    let known = KnownPhones::from_raw(["255755111222"], &PhoneFormat::default());
    let plan = plan_import(&prepared, &known);
    let created: Vec<usize> = plan.to_create.iter().map(|planned| planned.row).collect();
    assert_eq!(created, vec![4]);
    assert_eq!(plan.skipped_existing(), 2);
    assert_eq!(plan.skipped_duplicates(), 1);
}

#[test]
fn known_phones_without_phone_column_fail() {
    let file = write_temp("id,name\n1,Asha\n");
    let err = KnownPhones::load(file.path(), &PhoneFormat::default()).unwrap_err();
    assert!(matches!(err, IngestError::KnownPhones { .. }));
}

proptest! {
    #[test]
    fn every_data_line_becomes_a_record(
        rows in prop::collection::vec(prop::collection::vec("[a-z0-9 ]{0,8}", 0..6), 1..20)
    ) {
        let mut text = String::from("Name,Phone,City,Email\n");
        let mut expected = 0;
        for row in &rows {
            let line = row.join(",");
            if !line.trim().is_empty() {
                expected += 1;
            }
            text.push_str(&line);
            text.push('\n');
        }
        prop_assume!(expected > 0);

        let report = import_text(&text, &HeaderMatcher::builtin(), None).unwrap();
        prop_assert_eq!(report.row_count(), expected);
    }
}
