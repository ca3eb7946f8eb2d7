use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Screenshot,
    ReloadShaders,
}

impl KeyCommand {
    /// Fresh presses only; auto-repeat never re-triggers a command.
    #[must_use]
    pub fn from_key(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<Self> {
        if state != ElementState::Pressed || repeat {
            return None;
        }

        match key {
            PhysicalKey::Code(KeyCode::F12) => Some(Self::Screenshot),
            PhysicalKey::Code(KeyCode::KeyR) => Some(Self::ReloadShaders),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        Self::from_key(event.physical_key, event.state, event.repeat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys_map_to_commands() {
        assert_eq!(
            KeyCommand::from_key(PhysicalKey::Code(KeyCode::F12), ElementState::Pressed, false),
            Some(KeyCommand::Screenshot)
        );
        assert_eq!(
            KeyCommand::from_key(PhysicalKey::Code(KeyCode::KeyR), ElementState::Pressed, false),
            Some(KeyCommand::ReloadShaders)
        );
    }

    #[test]
    fn releases_and_repeats_are_ignored() {
        let f12 = PhysicalKey::Code(KeyCode::F12);

        assert_eq!(KeyCommand::from_key(f12, ElementState::Released, false), None);
        assert_eq!(KeyCommand::from_key(f12, ElementState::Pressed, true), None);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(
            KeyCommand::from_key(PhysicalKey::Code(KeyCode::KeyW), ElementState::Pressed, false),
            None
        );
    }
}
