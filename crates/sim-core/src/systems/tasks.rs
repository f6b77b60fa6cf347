//! Task System
//!
//! Starting and working tasks, successor chaining and vouch credits.

use sim_events::{PlayerId, TaskId};

use super::Simulation;

impl Simulation {
    /// Make `task` the active one.
    ///
    /// Legal when the task is queued or nothing is active. Crewmates consume
    /// the queue entry; impostors keep their queue untouched.
    pub(crate) fn start_task(&mut self, id: PlayerId, task: TaskId) -> bool {
        if self.map.task(task).is_none() {
            return false;
        }
        let Some(player) = self.players.get_mut(id.index()) else {
            return false;
        };
        if !player.is_alive() {
            return false;
        }
        let queued = player.tasks.iter().position(|&t| t == task);
        if queued.is_none() && player.current_task.is_some() {
            return false;
        }

        player.current_task = Some(task);
        player.ticks_elapsed = 0;
        if let (Some(index), true) = (queued, player.is_crewmate()) {
            player.tasks.remove(index);
        }
        true
    }

    /// One tick of work on the active task, at its location.
    pub(crate) fn work_task(&mut self, id: PlayerId) -> bool {
        let Some(player) = self.players.get(id.index()) else {
            return false;
        };
        if !player.is_alive() {
            return false;
        }
        let Some(task_id) = player.current_task else {
            return false;
        };
        let Some(task) = self.map.task(task_id) else {
            return false;
        };
        if task.location != player.location {
            return false;
        }

        let needed = self.rules.task_ticks(task.length);
        let successor = task.successors.first().copied();
        let visual = task.visual;

        let player = &mut self.players[id.index()];
        player.ticks_elapsed += 1;
        if player.ticks_elapsed < needed {
            return true;
        }

        player.ticks_elapsed = 0;
        player.current_task = None;
        if player.is_impostor() {
            return true;
        }

        if let Some(next) = successor {
            player.tasks.push(next);
        }
        if visual {
            let followers = player.followers.clone();
            for follower in followers {
                self.players[follower.index()].vouches_for.insert(id);
            }
        }
        true
    }
}
