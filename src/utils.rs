// ###################################
// ->   Error format chain
// ###################################
/// Calls `Error::source()` on a chain of errors and joins their messages with `": "`.
///
/// `reqwest` only names the failing url in its own message, the actual cause
/// (refused connection, dns failure, ...) lives further down the chain.
pub fn error_chain_string(e: &impl std::error::Error) -> String {
    let mut out = e.to_string();
    let mut current_src = e.source();
    while let Some(cause) = current_src {
        let msg = cause.to_string();
        // Some errors repeat their source's message in their own.
        if !out.ends_with(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        current_src = cause.source();
    }

    out
}
