// Actions available to the reinforcement learning agent
// Each action is a communication strategy; the index encodes escalation severity

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of strategies in the catalog
pub const STRATEGY_COUNT: usize = 7;

/// Ordered catalog of collection strategies, mildest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strategy {
    FriendlyReminder,
    PaymentPlanOffer,
    FirmReminder,
    ManagerEscalation,
    AssignToAgent,
    AssignToTelecaller,
    LegalNotification,
}

impl Strategy {
    /// All strategies ordered by escalation severity
    pub const ALL: [Strategy; STRATEGY_COUNT] = [
        Strategy::FriendlyReminder,
        Strategy::PaymentPlanOffer,
        Strategy::FirmReminder,
        Strategy::ManagerEscalation,
        Strategy::AssignToAgent,
        Strategy::AssignToTelecaller,
        Strategy::LegalNotification,
    ];

    /// Strategy at the given action index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Action index of this strategy
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Strategy::FriendlyReminder => "Friendly Reminder",
            Strategy::PaymentPlanOffer => "Payment Plan Offer",
            Strategy::FirmReminder => "Firm Reminder",
            Strategy::ManagerEscalation => "Manager Escalation",
            Strategy::AssignToAgent => "Assign to Agent",
            Strategy::AssignToTelecaller => "Assign to Telecaller",
            Strategy::LegalNotification => "Legal Notification",
        }
    }

    /// Canned agent replies for this strategy
    pub fn responses(self) -> &'static [&'static str] {
        match self {
            Strategy::FriendlyReminder => &[
                "Thank you for your response. We understand your situation and want to help find a solution.",
                "We appreciate your communication. Let's work together to resolve this matter.",
                "I understand. How can we make this easier for you?",
            ],
            Strategy::PaymentPlanOffer => &[
                "Would you be interested in setting up a payment plan that works better for your budget?",
                "We can offer flexible payment options. Let's discuss what might work for you.",
                "Perhaps we can arrange a more manageable payment schedule?",
            ],
            Strategy::FirmReminder => &[
                "This is a firm reminder that your payment is overdue. Please settle immediately.",
                "Your account requires immediate attention. Payment must be made today.",
                "We need to resolve this matter urgently. Please make payment arrangements now.",
            ],
            Strategy::ManagerEscalation => &[
                "I'm escalating this to my manager who will contact you directly.",
                "A senior team member will be in touch within 24 hours.",
                "This matter is being escalated to our management team.",
            ],
            Strategy::AssignToAgent => &[
                "I'm connecting you with a specialized agent who can provide more assistance.",
                "Let me transfer you to an agent with additional authorization.",
                "A senior agent will handle your case from here.",
            ],
            Strategy::AssignToTelecaller => &[
                "Our telecaller will contact you within 2 hours to discuss options.",
                "You will receive a priority call shortly to arrange payment.",
                "We're scheduling an urgent follow-up call.",
            ],
            Strategy::LegalNotification => &[
                "Legal action will be initiated if payment is not received within 48 hours.",
                "This matter is being referred to our legal department immediately.",
                "Legal proceedings will commence unless this is resolved today.",
            ],
        }
    }

    /// Pick one of the strategy's replies uniformly at random
    pub fn pick_response<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        self.responses()
            .choose(rng)
            .copied()
            .unwrap_or(Strategy::FriendlyReminder.responses()[0])
    }

    /// Position of the strategy on the [0, 1] severity scale
    pub fn severity_ratio(self) -> f64 {
        severity_ratio(self.index(), STRATEGY_COUNT)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `action / (strategy_count - 1)` with the denominator floored at 1
pub fn severity_ratio(action: usize, strategy_count: usize) -> f64 {
    let denominator = strategy_count.saturating_sub(1).max(1);
    action as f64 / denominator as f64
}
