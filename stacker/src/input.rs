use embedded_hal::digital::v2::InputPin;

/// Button levels sampled once per scheduler pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buttons {
    /// Drops the moving block; also leaves the end screens.
    pub drop: bool,
    /// Starts a game from the title screen and resets a running one.
    pub start: bool,
}

impl Buttons {
    pub fn any_held(&self) -> bool {
        self.drop || self.start
    }
}

/// An active-high button line. A line that cannot be read counts as
/// released.
pub struct Button<P> {
    pin: P,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P) -> Button<P> {
        Button { pin }
    }

    pub fn is_held(&self) -> bool {
        self.pin.is_high().unwrap_or(false)
    }
}

pub struct Input<DROP, START> {
    pub drop_button: Button<DROP>,
    pub start_button: Button<START>,
}

impl<DROP: InputPin, START: InputPin> Input<DROP, START> {
    pub fn new(drop_pin: DROP, start_pin: START) -> Self {
        Input {
            drop_button: Button::new(drop_pin),
            start_button: Button::new(start_pin),
        }
    }

    pub fn sample(&self) -> Buttons {
        Buttons {
            drop: self.drop_button.is_held(),
            start: self.start_button.is_held(),
        }
    }
}
