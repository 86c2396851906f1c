pub mod config;
pub mod dates;
pub mod http_client;
pub mod ingest;
pub mod logging;
pub mod match_list;
pub mod normalize;
pub mod odds_table;
pub mod record;
pub mod scheme;
pub mod sink;
pub mod source;
