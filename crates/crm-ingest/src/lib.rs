//! Customer file import: reading, header detection, normalization and
//! import planning.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use crm_ingest::{ImportOptions, KnownPhones, import_file, plan_import, prepare_customers};
//! use crm_map::HeaderMatcher;
//!
//! let options = ImportOptions::default();
//! let report = import_file(Path::new("customers.csv"), &options, &HeaderMatcher::builtin(), None)?;
//! let prepared = prepare_customers(&report, &options.phone);
//! let plan = plan_import(&prepared, &KnownPhones::new());
//! println!("{} customers to create", plan.to_create.len());
//! # Ok::<(), crm_ingest::IngestError>(())
//! ```

pub mod discovery;
pub mod error;
pub mod import;
pub mod normalize;
pub mod options;
pub mod plan;
pub mod prepare;
pub mod progress;
pub mod reader;
pub mod text;

pub use discovery::{expand_inputs, list_import_files};
pub use error::{IngestError, Result};
pub use import::{ProgressSink, import_file, import_text};
pub use normalize::{DEFAULT_COUNTRY_CODE, PhoneFormat, phone_key};
pub use options::{ImportOptions, MAX_IMPORT_FILE_SIZE};
pub use plan::{ImportPlan, KnownPhones, PlannedCustomer, SkipReason, SkippedRow, plan_import};
pub use prepare::{
    PreparedImport, PreparedRow, find_duplicate_phones, prepare_customer, prepare_customers,
    validate_customer,
};
pub use progress::{ImportProgress, NoticeThrottle};
pub use reader::{check_file_size_with_limit, decode_bytes, read_import_text};
