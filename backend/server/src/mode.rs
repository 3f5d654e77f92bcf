use std::sync::atomic::{AtomicBool, Ordering};

/// Demo mode disables same-day duplicate suppression so scans can be rehearsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInMode {
    Demo,
    Production,
}

impl CheckInMode {
    pub fn from_demo(is_demo: bool) -> Self {
        if is_demo { Self::Demo } else { Self::Production }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Demo => "Demo",
            Self::Production => "Production",
        }
    }
}

#[derive(Debug)]
pub struct ModeFlag {
    demo: AtomicBool,
}

impl ModeFlag {
    pub fn new(is_demo: bool) -> Self {
        Self {
            demo: AtomicBool::new(is_demo),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.demo.load(Ordering::SeqCst)
    }

    pub fn set_demo(&self, is_demo: bool) {
        self.demo.store(is_demo, Ordering::SeqCst);
    }

    pub fn mode(&self) -> CheckInMode {
        CheckInMode::from_demo(self.is_demo())
    }
}

impl Default for ModeFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_demo() {
        let flag = ModeFlag::default();
        assert_eq!(flag.mode(), CheckInMode::Demo);

        flag.set_demo(false);
        assert_eq!(flag.mode(), CheckInMode::Production);
        assert_eq!(flag.mode().label(), "Production");
    }
}
