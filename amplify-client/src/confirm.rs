//! Interactive confirmation for destructive actions

/// Prompt shown before deleting a member
pub const DELETE_MEMBER_PROMPT: &str = "Are you sure you want to delete this member?";

/// Prompt shown before deleting a tier
pub const DELETE_TIER_PROMPT: &str =
    "Are you sure you want to delete this tier? This cannot be undone.";

/// Asks the user to confirm an action
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms every prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
