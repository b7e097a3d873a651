//! Dashboard body rendering.
//!
//! The renderer is a pure function: identical inputs produce byte-identical
//! output. The dashboard task relies on this to diff against the last
//! rendered body and skip the edit call when nothing changed.

use crate::snapshot::{FeatMap, RoleSnapshot};

/// Marker for members whose presence status is anything but offline.
pub const ONLINE_MARKER: &str = "🟢";
/// Marker for offline members.
pub const OFFLINE_MARKER: &str = "⚪";

/// Render the canonical dashboard body for a role snapshot.
///
/// Layout:
/// - header naming the role
/// - one line per member: status marker, mention token, space-joined badges
/// - blank line, then an `Online: n / total` footer
///
/// Member lines are sorted by their full rendered text, lexicographically
/// ascending in byte order. The status marker participates in the sort key,
/// so a member moves when their marker or badge text changes; ties fall
/// back to the mention token's natural string order. No truncation happens
/// here: an oversized body is the edit call's problem, not the renderer's.
///
/// # Examples
///
/// ```
/// use rollcall_core::{render_dashboard, RoleMember, RoleSnapshot};
/// use std::collections::HashMap;
///
/// let snapshot = RoleSnapshot::new(
///     1,
///     "Guild-A",
///     vec![RoleMember::new(10, "@Alice", true)],
/// );
/// let body = render_dashboard(&snapshot, &HashMap::new());
/// assert_eq!(body, "Members of Guild-A:\n🟢 @Alice \n\nOnline: 1 / 1");
/// ```
pub fn render_dashboard(snapshot: &RoleSnapshot, feats: &FeatMap) -> String {
    let mut lines: Vec<String> = snapshot
        .members()
        .iter()
        .map(|member| {
            let marker = if *member.online() {
                ONLINE_MARKER
            } else {
                OFFLINE_MARKER
            };
            let badges = feats
                .get(member.user_id())
                .map(|list| list.join(" "))
                .unwrap_or_default();
            format!("{} {} {}", marker, member.mention(), badges)
        })
        .collect();
    lines.sort();

    format!(
        "Members of {}:\n{}\n\nOnline: {} / {}",
        snapshot.role_name(),
        lines.join("\n"),
        snapshot.online_count(),
        snapshot.members().len(),
    )
}
