//! Exit-code mapping.
//!
//! Exit 1 for ordinary failures, exit 2 when the input graph itself is
//! corrupt, so scripts can distinguish "try again" from "fix your data".

use lit_graph_store::StoreError;

/// Map an error chain to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if matches!(cause.downcast_ref::<StoreError>(), Some(StoreError::Syntax { .. })) {
            return 2;
        }
    }
    1
}
