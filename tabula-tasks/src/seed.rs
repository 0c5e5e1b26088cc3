//! Mock data generation into an owned collection.

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::model::{Task, TaskStatus, User};

/// Shape of the generated collection.
#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    /// Number of users to invent.
    pub user_count: usize,
    /// Upper bound of tasks per user; each user gets 1 to this many.
    pub max_tasks_per_user: usize,
    /// How far into the past creation times may fall.
    pub history_days: i64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            user_count: 10,
            max_tasks_per_user: 10,
            history_days: 30,
        }
    }
}

/// Generates users and their tasks.
///
/// The seeder is constructed and invoked explicitly and returns an
/// owned collection; nothing is stashed in module state on first
/// touch. Hand the result to a `MemorySource`.
#[derive(Debug, Clone)]
pub struct TaskSeeder {
    config: SeedConfig,
}

impl TaskSeeder {
    /// Create a seeder with the given shape.
    pub fn new(config: SeedConfig) -> Self {
        Self { config }
    }

    /// Generate the full collection, newest first.
    pub fn generate(&self) -> Vec<Task> {
        let mut rng = rand::rng();
        let now = Utc::now();
        let history_secs = self.config.history_days.max(0) * 24 * 60 * 60;

        let users = self.users();
        let mut tasks = Vec::new();
        for user in &users {
            let count = if self.config.max_tasks_per_user == 0 {
                0
            } else {
                rng.random_range(1..=self.config.max_tasks_per_user)
            };
            for index in 0..count {
                let age = if history_secs == 0 {
                    0
                } else {
                    rng.random_range(0..history_secs)
                };
                tasks.push(Task {
                    id: Uuid::new_v4().to_string(),
                    title: format!("Task {} ({})", index + 1, user.name),
                    description: Some(format!("Filed by {}", user.name)),
                    status: Self::status(&mut rng),
                    created_at: now - Duration::seconds(age),
                    created_by: user.clone(),
                });
            }
        }

        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks
    }

    fn users(&self) -> Vec<User> {
        (0..self.config.user_count)
            .map(|index| User {
                id: Uuid::new_v4().to_string(),
                name: format!("User {}", index + 1),
                email: format!("user{}@example.com", index + 1),
            })
            .collect()
    }

    fn status(rng: &mut impl Rng) -> TaskStatus {
        match rng.random_range(0..3) {
            0 => TaskStatus::Todo,
            1 => TaskStatus::InProgress,
            _ => TaskStatus::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_user_gets_between_one_and_max_tasks() {
        let seeder = TaskSeeder::new(SeedConfig {
            user_count: 5,
            max_tasks_per_user: 4,
            history_days: 7,
        });
        let tasks = seeder.generate();

        let users: HashSet<&str> = tasks.iter().map(|t| t.created_by.id.as_str()).collect();
        assert_eq!(users.len(), 5);

        for user in &users {
            let count = tasks.iter().filter(|t| t.created_by.id == *user).count();
            assert!((1..=4).contains(&count));
        }
    }

    #[test]
    fn test_collection_comes_newest_first() {
        let tasks = TaskSeeder::new(SeedConfig::default()).generate();
        for pair in tasks.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_task_ids_are_unique() {
        let tasks = TaskSeeder::new(SeedConfig::default()).generate();
        let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), tasks.len());
    }

    #[test]
    fn test_zero_shapes_produce_nothing() {
        let tasks = TaskSeeder::new(SeedConfig {
            user_count: 0,
            max_tasks_per_user: 0,
            history_days: 0,
        })
        .generate();
        assert!(tasks.is_empty());
    }
}
