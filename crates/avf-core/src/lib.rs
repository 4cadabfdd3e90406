pub mod config;
pub mod logging;

pub mod batch;
pub mod checksum;
pub mod extract;
pub mod http;
pub mod report;
pub mod sources;
pub mod storage;
pub mod task;
pub mod url_model;
