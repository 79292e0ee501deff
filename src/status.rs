use crate::models::PaymentStatus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusWatch {
    #[default]
    Pending,
    Settled(PaymentStatus),
}

impl StatusWatch {
    pub fn on_message(&mut self, message: &str) -> Option<PaymentStatus> {
        if let Self::Settled(_) = self {
            return None;
        }
        let status = PaymentStatus::parse(message).filter(|status| status.is_terminal())?;
        *self = Self::Settled(status);
        Some(status)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    Remaining(u32),
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    minutes_left: u32,
}

impl Countdown {
    pub fn parse(text: &str) -> Option<Self> {
        let minutes_left = text.trim().parse::<u32>().ok()?;
        Some(Self { minutes_left })
    }

    pub fn minutes_left(&self) -> u32 {
        self.minutes_left
    }

    pub fn is_running(&self) -> bool {
        self.minutes_left > 0
    }

    pub fn tick(&mut self) -> CountdownTick {
        self.minutes_left = self.minutes_left.saturating_sub(1);
        if self.minutes_left == 0 {
            CountdownTick::Finished
        } else {
            CountdownTick::Remaining(self.minutes_left)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaymentTracker {
    watch: StatusWatch,
    countdown: Option<Countdown>,
}

impl PaymentTracker {
    pub fn new(countdown: Option<Countdown>) -> Self {
        Self {
            watch: StatusWatch::Pending,
            countdown: countdown.filter(Countdown::is_running),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.watch.is_settled()
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn on_message(&mut self, message: &str) -> Option<PaymentStatus> {
        let status = self.watch.on_message(message)?;
        self.countdown = None;
        Some(status)
    }

    /// `None` once the countdown has stopped; the timer should be dropped.
    pub fn tick(&mut self) -> Option<CountdownTick> {
        let tick = self.countdown.as_mut()?.tick();
        if tick == CountdownTick::Finished {
            self.countdown = None;
        }
        Some(tick)
    }
}
