use tokio::sync::Mutex;

use crate::table::Table;

/// Guards the [`Table`] shared by the referee and the watchers.
///
/// The table is only reachable from inside [`GameLock::with`], whose critical
/// section is a plain closure: it cannot await, so no loop ever suspends while
/// holding the table.
#[derive(Debug)]
pub struct GameLock {
    table: Mutex<Table>,
}

impl GameLock {
    pub fn new(table: Table) -> Self {
        Self {
            table: Mutex::new(table),
        }
    }

    pub async fn with<R>(&self, critical_section: impl FnOnce(&mut Table) -> R) -> R {
        let mut table = self.table.lock().await;
        critical_section(&mut table)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::player::Roster;

    #[tokio::test]
    async fn concurrent_sections_do_not_interleave() {
        let roster = Roster::new(vec!["Mark".into(), "Talha".into()]).unwrap();
        let game = Arc::new(GameLock::new(Table::new(roster, StdRng::seed_from_u64(1))));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let game = game.clone();
                tokio::spawn(async move {
                    for _ in 0..100 {
                        game.with(|table| {
                            let seen = table.state().previous_player_index;
                            table.state_mut().previous_player_index = seen + 1;
                        })
                        .await;
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        // Used as a plain counter: no increment may be lost.
        let total = game.with(|table| table.state().previous_player_index).await;
        assert_eq!(total, 8 * 100);
    }
}
