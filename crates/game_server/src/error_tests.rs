use super::*;
use chess_core::{Color, pos};

#[test]
fn error_display_messages() {
    assert_eq!(GameError::NotFound(7).to_string(), "game 7 not found");
    assert_eq!(GameError::Role("move").to_string(), "only players can move");
    let err: GameError = IllegalMove::WrongTurn(Color::Black).into();
    assert_eq!(err.to_string(), "invalid move: it is BLACK's turn");
    let err: GameError = IllegalMove::NoPiece(pos("e4")).into();
    assert_eq!(err.to_string(), "invalid move: no piece at e4");
}

#[test]
fn messages_carry_the_marker() {
    assert_eq!(
        GameError::GameOver.to_message(),
        ServerMessage::Error {
            error_message: "Error: game is over".into()
        }
    );
}

#[test]
fn errors_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GameError>();
}
