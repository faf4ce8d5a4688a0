//! In-memory card store speaking the text command protocol over HTTP.
//!
//! `POST /command` takes one command as the request body and answers with
//! plain text. Two commands are understood:
//!
//! - `show-cards {listId}`: tab-separated rows, header `title id content due`,
//!   natural order, newlines in content written as `<|NEWLINE|>`.
//! - `shift-card {cardId} to {newIndex}`: move a card within its list.

use std::{collections::BTreeMap, str::FromStr, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const NEWLINE_TOKEN: &str = "<|NEWLINE|>";
pub const HEADER: &str = "title\tid\tcontent\tdue";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCard {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "unset_due")]
    pub due: i64,
}

fn unset_due() -> i64 {
    -1
}

/// Every list's cards, each list in natural order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub lists: BTreeMap<i64, Vec<StoredCard>>,
}

impl Board {
    /// Small board used when no seed file is configured.
    pub fn sample() -> Self {
        let card = |id: i64, title: &str, content: &str, due: i64| StoredCard {
            id,
            title: title.to_string(),
            content: content.to_string(),
            due,
        };
        let mut lists = BTreeMap::new();
        lists.insert(
            1,
            vec![
                card(1, "Fix bug", "line1\nline2", 100),
                card(2, "Write docs", "hello", 200),
                card(3, "Release", "", -1),
            ],
        );
        lists.insert(2, vec![card(4, "Triage inbox", "", -1)]);
        Self { lists }
    }

    pub fn show_cards(&self, list_id: i64) -> String {
        let mut out = format!("{HEADER}\n");
        for card in self.lists.get(&list_id).into_iter().flatten() {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                card.title,
                card.id,
                card.content.replace('\n', NEWLINE_TOKEN),
                card.due
            ));
        }
        out
    }

    /// Move `card_id` to `new_index` in its list; indexes past the end append.
    pub fn shift_card(&mut self, card_id: i64, new_index: usize) -> Result<(), CommandError> {
        let cards = self
            .lists
            .values_mut()
            .find(|cards| cards.iter().any(|c| c.id == card_id))
            .ok_or(CommandError::UnknownCard(card_id))?;
        let from = cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or(CommandError::UnknownCard(card_id))?;
        let card = cards.remove(from);
        let to = new_index.min(cards.len());
        cards.insert(to, card);
        Ok(())
    }

    pub fn apply(&mut self, command: Command) -> Result<String, CommandError> {
        match command {
            Command::ShowCards { list_id } => Ok(self.show_cards(list_id)),
            Command::ShiftCard { card_id, new_index } => {
                self.shift_card(card_id, new_index)?;
                Ok(String::new())
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ShowCards { list_id: i64 },
    ShiftCard { card_id: i64, new_index: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unrecognized command: {0}")]
    Unparseable(String),
    #[error("no card {0}")]
    UnknownCard(i64),
}

impl CommandError {
    fn status(&self) -> StatusCode {
        match self {
            CommandError::Unparseable(_) => StatusCode::BAD_REQUEST,
            CommandError::UnknownCard(_) => StatusCode::NOT_FOUND,
        }
    }

    fn into_response(self) -> (StatusCode, String) {
        (self.status(), format!("{self}\n"))
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let unparseable = || CommandError::Unparseable(s.trim().to_string());
        match words.as_slice() {
            ["show-cards", list_id] => Ok(Command::ShowCards {
                list_id: list_id.parse::<i64>().map_err(|_| unparseable())?,
            }),
            ["shift-card", card_id, "to", new_index] => Ok(Command::ShiftCard {
                card_id: card_id.parse::<i64>().map_err(|_| unparseable())?,
                new_index: new_index.parse::<usize>().map_err(|_| unparseable())?,
            }),
            _ => Err(unparseable()),
        }
    }
}

pub type Db = Arc<RwLock<Board>>;

pub fn app() -> Router {
    app_with(Board::default())
}

pub fn app_with(board: Board) -> Router {
    let db: Db = Arc::new(RwLock::new(board));
    Router::new().route("/command", post(run_command)).with_state(db)
}

pub async fn run(listener: TcpListener, board: Board) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(board)).await
}

async fn run_command(State(db): State<Db>, body: String) -> Result<String, (StatusCode, String)> {
    let command: Command = body.parse().map_err(CommandError::into_response)?;
    tracing::debug!(?command, "store command");
    db.write().await.apply(command).map_err(|err| {
        tracing::info!(?err, "store command failed");
        err.into_response()
    })
}
