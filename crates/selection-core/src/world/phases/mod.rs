pub(super) mod collision;
pub(super) mod forage;
pub(super) mod reproduction;
