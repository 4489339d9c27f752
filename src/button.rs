//! Button input sampling over `embedded-hal` digital pins.

use embedded_hal::digital::InputPin;

/// Electrical polarity of the button wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonPolarity {
    /// Pull-down wiring: the pin reads high while the button is held.
    ActiveHigh,
    /// Pull-up wiring: the pin reads low while the button is held.
    ActiveLow,
}

/// A game button owning its input pin.
///
/// Normalizes the raw pin level to a pressed/released reading so the rest of
/// the crate never has to know how the button is wired.
pub struct Button<P: InputPin> {
    pin: P,
    polarity: ButtonPolarity,
}

impl<P: InputPin> Button<P> {
    /// Creates a button with explicit polarity.
    pub fn new(pin: P, polarity: ButtonPolarity) -> Self {
        Self { pin, polarity }
    }

    /// Creates a button wired active-high (external pull-down resistor).
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, ButtonPolarity::ActiveHigh)
    }

    /// Creates a button wired active-low (external or internal pull-up).
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, ButtonPolarity::ActiveLow)
    }

    /// Samples the pin once and reports whether the button is held.
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        match self.polarity {
            ButtonPolarity::ActiveHigh => self.pin.is_high(),
            ButtonPolarity::ActiveLow => self.pin.is_low(),
        }
    }

    /// Returns the wiring polarity.
    pub fn polarity(&self) -> ButtonPolarity {
        self.polarity
    }

    /// Consumes the button, handing the pin back.
    pub fn into_pin(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorType, InputPin};

    struct LevelPin {
        high: bool,
    }

    impl ErrorType for LevelPin {
        type Error = core::convert::Infallible;
    }

    impl InputPin for LevelPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    #[test]
    fn active_high_button_follows_pin_level() {
        let mut button = Button::active_high(LevelPin { high: true });
        assert!(button.is_pressed().unwrap());

        let mut button = Button::active_high(LevelPin { high: false });
        assert!(!button.is_pressed().unwrap());
    }

    #[test]
    fn active_low_button_inverts_pin_level() {
        let mut button = Button::active_low(LevelPin { high: false });
        assert!(button.is_pressed().unwrap());

        let mut button = Button::active_low(LevelPin { high: true });
        assert!(!button.is_pressed().unwrap());
    }

    #[test]
    fn into_pin_returns_the_wrapped_pin() {
        let button = Button::active_high(LevelPin { high: true });
        assert_eq!(button.polarity(), ButtonPolarity::ActiveHigh);
        let mut pin = button.into_pin();
        assert!(pin.is_high().unwrap());
    }
}
