pub mod query;

pub use query::{
    DecodeError, DecodeReason, QueryField, QueryMap, decode, encode, parse_query_string,
    share_url,
};
