use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    ParticipantA,
    ParticipantB,
}

impl Participant {
    pub const ALL: [Participant; 2] = [Participant::ParticipantA, Participant::ParticipantB];

    /// Key used for this participant in the stored document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Participant::ParticipantA => "participantA",
            Participant::ParticipantB => "participantB",
        }
    }

    /// Key the first release of the tracker stored this participant under.
    pub fn legacy_key(&self) -> &'static str {
        match self {
            Participant::ParticipantA => "faizal",
            Participant::ParticipantB => "ainun",
        }
    }
}

impl FromStr for Participant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "a" | "participanta" => Ok(Participant::ParticipantA),
            "b" | "participantb" => Ok(Participant::ParticipantB),
            _ => Err(anyhow::anyhow!("Unknown participant: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leader {
    Ahead(Participant),
    Tie,
}

/// Strict comparison of the two scores; equal scores are a tie.
pub fn leader(score_a: u32, score_b: u32) -> Leader {
    match score_a.cmp(&score_b) {
        std::cmp::Ordering::Greater => Leader::Ahead(Participant::ParticipantA),
        std::cmp::Ordering::Less => Leader::Ahead(Participant::ParticipantB),
        std::cmp::Ordering::Equal => Leader::Tie,
    }
}
