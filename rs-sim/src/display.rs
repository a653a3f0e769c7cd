use tracing::debug;

pub const POWER_ON_SECS: f32 = 1.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayPhase {
    #[default]
    Off,
    PoweringOn,
    On,
}

/// Power state of the virtual display. Only meaningful while seated or focused.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayPowerState {
    pub phase: DisplayPhase,
    /// Seconds spent in `PoweringOn`.
    pub timer: f32,
    pub power_on_secs: f32,
}

impl Default for DisplayPowerState {
    fn default() -> Self {
        Self::new(POWER_ON_SECS)
    }
}

impl DisplayPowerState {
    pub fn new(power_on_secs: f32) -> Self {
        Self {
            phase: DisplayPhase::Off,
            timer: 0.0,
            power_on_secs,
        }
    }

    pub fn toggle(&mut self) {
        self.phase = match self.phase {
            DisplayPhase::Off => DisplayPhase::PoweringOn,
            // Pressing power mid-boot aborts the boot.
            DisplayPhase::PoweringOn | DisplayPhase::On => DisplayPhase::Off,
        };
        self.timer = 0.0;
        debug!("display power -> {:?}", self.phase);
    }

    pub fn advance(&mut self, dt: f32) {
        if self.phase != DisplayPhase::PoweringOn {
            return;
        }
        self.timer += dt;
        if self.timer + crate::TIMER_EPS >= self.power_on_secs {
            self.phase = DisplayPhase::On;
            self.timer = 0.0;
            debug!("display power -> On");
        }
    }

    /// Forced shutdown; an in-progress boot is cancelled, not completed.
    pub fn reset(&mut self) {
        self.phase = DisplayPhase::Off;
        self.timer = 0.0;
    }

    /// Boot progress in `[0, 1]`; 1 once on.
    pub fn progress(&self) -> f32 {
        match self.phase {
            DisplayPhase::Off => 0.0,
            DisplayPhase::PoweringOn => (self.timer / self.power_on_secs).clamp(0.0, 1.0),
            DisplayPhase::On => 1.0,
        }
    }
}
