//! Network status

/// What a connectivity event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkChange {
    /// Connection lost; the toast is now showing.
    WentOffline,

    /// Connection restored; the toast should hide after a short delay.
    WentOnline,

    /// Nothing changed.
    Unchanged,
}

/// Connectivity and the offline toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStatus {
    online: bool,
    toast: bool,
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self {
            online: true,
            toast: false,
        }
    }
}

impl NetworkStatus {
    /// Apply a connectivity event.
    pub fn set_online(&mut self, online: bool) -> NetworkChange {
        if online == self.online {
            return NetworkChange::Unchanged;
        }

        self.online = online;

        if online {
            NetworkChange::WentOnline
        } else {
            self.toast = true;
            NetworkChange::WentOffline
        }
    }

    /// Hide the toast unless the connection dropped again.
    pub fn hide_toast(&mut self) {
        if self.online {
            self.toast = false;
        }
    }

    /// Whether the kiosk is online
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Whether the network toast is showing
    pub fn toast_visible(&self) -> bool {
        self.toast
    }
}
