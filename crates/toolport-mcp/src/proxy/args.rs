//! Call option assembly for dynamically dispatched tools.

use serde_json::{Map, Value};
use toolport_core::CallOptions;

/// Build call options from the two positional arguments of a dynamic call.
///
/// - An object `second` is merged into the options bag.
/// - An object `first` containing `args`, with no `second`, is a full options
///   bag and merged as-is.
/// - Any other `first` is the tool arguments.
pub(crate) fn assemble_options(first: Option<Value>, second: Option<Value>) -> CallOptions {
    let mut bag = Map::new();
    let full_options_allowed = second.is_none();

    if let Some(Value::Object(fields)) = second {
        bag.extend(fields);
    }

    match first {
        Some(Value::Object(fields)) if full_options_allowed && fields.contains_key("args") => {
            bag.extend(fields);
        }
        Some(args) => {
            bag.insert("args".to_string(), args);
        }
        None => {}
    }

    CallOptions::from_bag(bag)
}
