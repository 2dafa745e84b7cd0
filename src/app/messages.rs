use crossterm::event::KeyEvent;

/// Messages dispatched into `App::update` by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}
