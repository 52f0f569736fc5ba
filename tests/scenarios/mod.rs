mod cross_references;
mod entry_points;
mod folders;
mod live_editing;
mod transfer;
