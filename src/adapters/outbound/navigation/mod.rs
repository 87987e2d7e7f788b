/// Navigation state adapters
mod query_string;

pub use query_string::{
    QueryStringNavigation, OPERATION_PARAM, SERVICE_PARAM, VISIBILITY_KEY_PARAM,
};
