pub mod budget_service;
pub mod export_service;
pub mod query_service;
pub mod summary_service;

pub use budget_service::BudgetService;
pub use export_service::ExportService;
pub use query_service::QueryService;
pub use summary_service::SummaryService;
