use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::board::{Board, HandTable};
use crate::card::Card;
use crate::player::PlayerId;
use crate::turn::Action;

/// Status carried by `take` for a game still in progress.
pub const ALIVE: &str = "alive";

/// One tuple on the bus. `player` is the sender of client requests and the
/// addressee of server notices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub player: PlayerId,
    pub body: Body,
}

impl Message {
    pub fn new(player: impl Into<PlayerId>, body: Body) -> Self {
        Self {
            player: player.into(),
            body,
        }
    }

    pub fn command(&self) -> Command {
        self.body.command()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "payload", rename_all = "camelCase")]
pub enum Body {
    Ready,
    AllReady,
    Take(TakeStatus),
    Players(Vec<PlayerId>),
    Taken,
    Takes(PlayerId),
    Action(Action),
    Invalid,
    Success,
    Ended,
    Board(Board),
    Cards(Vec<Card>),
    Card(Card),
    CallUno,
    UnoCalled(PlayerId),
    MissingUno,
    MissingUnoApplied { accused: PlayerId, accuser: PlayerId },
    InspectBoard,
    InspectHands,
    Hands(HandTable),
}

impl Body {
    pub fn command(&self) -> Command {
        match self {
            Body::Ready => Command::Ready,
            Body::AllReady => Command::AllReady,
            Body::Take(_) => Command::Take,
            Body::Players(_) => Command::Players,
            Body::Taken => Command::Taken,
            Body::Takes(_) => Command::Takes,
            Body::Action(_) => Command::Action,
            Body::Invalid => Command::Invalid,
            Body::Success => Command::Success,
            Body::Ended => Command::Ended,
            Body::Board(_) => Command::Board,
            Body::Cards(_) => Command::Cards,
            Body::Card(_) => Command::Card,
            Body::CallUno => Command::CallUno,
            Body::UnoCalled(_) => Command::UnoCalled,
            Body::MissingUno => Command::MissingUno,
            Body::MissingUnoApplied { .. } => Command::MissingUnoApplied,
            Body::InspectBoard => Command::InspectBoard,
            Body::InspectHands => Command::InspectHands,
            Body::Hands(_) => Command::Hands,
        }
    }
}

/// Payload-free tag of a [`Body`]. `Display` gives the protocol name, which
/// several commands share (the three `UNO` tuples differ only by shape).
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Command {
    #[strum(serialize = "ready")]
    Ready,
    #[strum(serialize = "allReady")]
    AllReady,
    #[strum(serialize = "take")]
    Take,
    #[strum(serialize = "players")]
    Players,
    #[strum(serialize = "taken")]
    Taken,
    #[strum(serialize = "takes")]
    Takes,
    #[strum(serialize = "action")]
    Action,
    #[strum(serialize = "invalid")]
    Invalid,
    #[strum(serialize = "success")]
    Success,
    #[strum(serialize = "ended")]
    Ended,
    #[strum(serialize = "board")]
    Board,
    #[strum(serialize = "cards")]
    Cards,
    #[strum(serialize = "card")]
    Card,
    #[strum(serialize = "UNO")]
    CallUno,
    #[strum(serialize = "UNO")]
    UnoCalled,
    #[strum(serialize = "missingUNO")]
    MissingUno,
    #[strum(serialize = "UNO")]
    MissingUnoApplied,
    #[strum(serialize = "board")]
    InspectBoard,
    #[strum(serialize = "hands")]
    InspectHands,
    #[strum(serialize = "hands")]
    Hands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    ToServer,
    ToClient,
}

impl Command {
    pub fn flow(self) -> Flow {
        match self {
            Command::Ready
            | Command::Taken
            | Command::Action
            | Command::Ended
            | Command::CallUno
            | Command::MissingUno
            | Command::InspectBoard
            | Command::InspectHands => Flow::ToServer,
            _ => Flow::ToClient,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum TakeStatus {
    Alive,
    Winner(PlayerId),
}

impl From<TakeStatus> for String {
    fn from(status: TakeStatus) -> Self {
        match status {
            TakeStatus::Alive => ALIVE.to_string(),
            TakeStatus::Winner(winner) => winner,
        }
    }
}

impl From<String> for TakeStatus {
    fn from(status: String) -> Self {
        if status == ALIVE {
            TakeStatus::Alive
        } else {
            TakeStatus::Winner(status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardColor, CardValue};

    #[test]
    fn commands_display_their_protocol_names() {
        assert_eq!(Command::AllReady.to_string(), "allReady");
        assert_eq!(Command::CallUno.to_string(), "UNO");
        assert_eq!(Command::MissingUnoApplied.to_string(), "UNO");
        assert_eq!(Command::MissingUno.to_string(), "missingUNO");
    }

    #[test]
    fn client_requests_flow_to_the_server() {
        assert_eq!(Command::Taken.flow(), Flow::ToServer);
        assert_eq!(Command::CallUno.flow(), Flow::ToServer);
        assert_eq!(Command::UnoCalled.flow(), Flow::ToClient);
        assert_eq!(Command::Board.flow(), Flow::ToClient);
        assert_eq!(Command::InspectBoard.flow(), Flow::ToServer);
    }

    #[test]
    fn take_status_is_alive_or_the_winner() {
        let alive = serde_json::to_string(&Body::Take(TakeStatus::Alive)).unwrap();
        assert_eq!(alive, r#"{"command":"take","payload":"alive"}"#);

        let won: Body = serde_json::from_str(r#"{"command":"take","payload":"Talha"}"#).unwrap();
        assert_eq!(won, Body::Take(TakeStatus::Winner("Talha".to_string())));
    }

    #[test]
    fn action_messages_carry_the_tagged_action() {
        let message = Message::new(
            "Mark",
            Body::Action(Action::Play {
                card: Card::new(CardColor::Red, CardValue::Number(3)),
            }),
        );
        assert_eq!(message.command(), Command::Action);

        let json = serde_json::to_string(&message).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, message);
    }
}
