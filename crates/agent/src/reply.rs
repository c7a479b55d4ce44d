//! Reply assembly: the model's prose plus a trailing action receipt.

use crate::executor::ExecutionResult;

/// Appends a confirmation block to the reply when an action actually ran.
/// Skipped and failed executions leave the reply untouched; the caller
/// decides how to surface those.
pub fn append_confirmation(reply: &str, result: &ExecutionResult) -> String {
    if !result.success {
        return reply.to_string();
    }
    format!("{reply}\n\n---\n**Action Executed:** {}", result.message)
}

#[cfg(test)]
mod tests {
    use crate::executor::ExecutionResult;
    use crate::intent::IntentKind;

    use super::append_confirmation;

    #[test]
    fn successful_execution_appends_a_receipt() {
        let result = ExecutionResult {
            success: true,
            kind: IntentKind::CreateTask,
            message: "Created task \"call the investor\"".to_string(),
            created: None,
            error: None,
        };

        let reply = append_confirmation("On it.", &result);
        assert_eq!(reply, "On it.\n\n---\n**Action Executed:** Created task \"call the investor\"");
    }

    #[test]
    fn skipped_execution_leaves_the_reply_alone() {
        let result = ExecutionResult {
            success: false,
            kind: IntentKind::Unknown,
            message: "No action taken".to_string(),
            created: None,
            error: None,
        };

        assert_eq!(append_confirmation("Sure thing.", &result), "Sure thing.");
    }
}
