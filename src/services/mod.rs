pub mod report_service;
pub mod storage;
