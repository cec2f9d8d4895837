use std::fmt;

/// Host events the session subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    KeyDown,
    KeyUp,
    Resize,
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Resize => "resize",
        };
        f.write_str(name)
    }
}

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// The host's event registry (document and window listeners in a browser).
pub trait HostEvents {
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;
    /// Returns false if `id` was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

/// In-memory registry that remembers what was added and removed.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    next_id: u32,
    active: Vec<(ListenerId, ListenerKind)>,
    removed: Vec<ListenerId>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[(ListenerId, ListenerKind)] {
        &self.active
    }

    pub fn removed(&self) -> &[ListenerId] {
        &self.removed
    }

    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.active.iter().any(|(_, k)| *k == kind)
    }
}

impl HostEvents for RecordingHost {
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.active.push((id, kind));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let Some(index) = self.active.iter().position(|(active, _)| *active == id) else {
            return false;
        };
        self.active.remove(index);
        self.removed.push(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut host = RecordingHost::new();
        let a = host.add_listener(ListenerKind::KeyDown);
        let b = host.add_listener(ListenerKind::KeyDown);
        assert_ne!(a, b);
        assert_eq!(host.active().len(), 2);
    }

    #[test]
    fn remove_is_one_shot() {
        let mut host = RecordingHost::new();
        let id = host.add_listener(ListenerKind::Resize);
        assert!(host.remove_listener(id));
        assert!(!host.remove_listener(id));
        assert_eq!(host.removed(), &[id]);
        assert!(!host.is_listening(ListenerKind::Resize));
    }

    #[test]
    fn kind_names_match_dom_events() {
        assert_eq!(ListenerKind::KeyDown.to_string(), "keydown");
        assert_eq!(ListenerKind::Resize.to_string(), "resize");
    }
}
