use crate::identifiers::PlayerName;
use crate::protocol::GameStateSnapshot;

/// What one player should currently work on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedView {
    pub chain_owner: Option<PlayerName>,
    pub image_to_show: Option<String>,
}

/// Finds the chain assigned to `player` and the image they must describe:
/// the newest step in that chain written by someone else. The player's own
/// steps are skipped, and a step whose image is still being generated yields
/// no image rather than falling back to an older one.
pub fn resolve(player: &str, snapshot: &GameStateSnapshot) -> DerivedView {
    if player.is_empty() {
        return DerivedView::default();
    }

    let Some(owner) = snapshot
        .assignments
        .as_ref()
        .and_then(|assignments| assignments.get(player))
    else {
        return DerivedView::default();
    };

    let image_to_show = snapshot
        .chain(owner.as_str())
        .iter()
        .rev()
        .find(|step| step.player != player)
        .and_then(|step| step.image.clone());

    DerivedView {
        chain_owner: Some(owner.clone()),
        image_to_show,
    }
}
