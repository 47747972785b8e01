/// Animation descriptions: channels, timing, repeat and fill.
pub mod anim;
/// Easing curves.
pub mod ease;
/// Engine that attaches animations to layers and samples them per frame.
pub mod engine;
