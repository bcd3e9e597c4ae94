/// Handle for one armed run of the display tick. Tokens from a cancelled run
/// are never accepted again, even if the ticker is re-armed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Ticker {
    generation: u64,
    armed: bool,
}

impl Ticker {
    pub fn arm(&mut self) -> TickToken {
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        TickToken {
            generation: self.generation,
        }
    }

    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn accepts(&self, token: TickToken) -> bool {
        self.armed && token.generation == self.generation
    }
}
