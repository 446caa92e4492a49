//! Question group scheduling and lifecycle.
//!
//! A group is created with its question card, gets its answer set built
//! `answer_reveal_delay_ms` later, and has its answers dropped in one by one.
//! It ends either when one of its answers is caught (`resolve_catch`) or when
//! its question card falls off screen (returned from `update` as expired).

use glam::Vec2;

use crate::api::game::{CardConfig, SpawnConfig};
use crate::api::types::{AnswerId, GameEvent, GroupId};
use crate::content::{EntityCatalog, Question, QuestionPool};
use crate::core::timer::{Scheduler, TimerId};
use crate::objects::cards::{AnswerCard, QuestionCard};
use crate::spawn::distractors::select_distractors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    /// Only the question card is falling.
    Spawned,
    /// The answer set has been built; cards may still be dropping in.
    AnswersRevealed,
}

#[derive(Debug, Clone, PartialEq)]
enum SpawnTask {
    SpawnQuestion,
    RevealAnswers(GroupId),
    DropAnswer(GroupId, AnswerId),
}

/// One question and its answer choices.
#[derive(Debug, Clone)]
pub struct QuestionGroup {
    pub id: GroupId,
    pub question: Question,
    pub card: QuestionCard,
    pub state: GroupState,
    pub spawned_at: f64,
    /// Answers currently falling.
    pub answers: Vec<AnswerCard>,
    /// Built but not yet dropped.
    pending: Vec<AnswerCard>,
    correct_answer: Option<AnswerId>,
}

impl QuestionGroup {
    pub fn correct_answer(&self) -> Option<AnswerId> {
        self.correct_answer
    }

    /// Size of the answer set, dropped or not.
    pub fn answer_count(&self) -> usize {
        self.answers.len() + self.pending.len()
    }

    fn cards(&self) -> impl Iterator<Item = &AnswerCard> {
        self.answers.iter().chain(self.pending.iter())
    }

    fn cards_mut(&mut self) -> impl Iterator<Item = &mut AnswerCard> {
        self.answers.iter_mut().chain(self.pending.iter_mut())
    }
}

/// Result of catching an answer: the detached card plus what scoring needs.
#[derive(Debug, Clone)]
pub struct CatchResolution {
    pub group: GroupId,
    pub question_id: String,
    pub correct_entity_id: String,
    /// The caught card, already attached. The caller owns it from here on.
    pub card: AnswerCard,
}

impl CatchResolution {
    pub fn is_correct(&self) -> bool {
        self.card.is_correct
    }
}

pub struct SpawnCoordinator {
    spawn: SpawnConfig,
    cards: CardConfig,
    world_height: f32,
    catalog: EntityCatalog,
    pool: QuestionPool,
    rng: fastrand::Rng,
    timers: Scheduler<SpawnTask>,
    first_spawn: Option<TimerId>,
    repeat_spawn: Option<TimerId>,
    groups: Vec<QuestionGroup>,
    next_group: u32,
    next_answer: u32,
    events: Vec<GameEvent>,
}

impl SpawnCoordinator {
    pub fn new(
        spawn: SpawnConfig,
        cards: CardConfig,
        world_height: f32,
        catalog: EntityCatalog,
        pool: QuestionPool,
        seed: u64,
    ) -> Self {
        Self {
            spawn,
            cards,
            world_height,
            catalog,
            pool,
            rng: fastrand::Rng::with_seed(seed),
            timers: Scheduler::new(),
            first_spawn: None,
            repeat_spawn: None,
            groups: Vec::new(),
            next_group: 1,
            next_answer: 1,
            events: Vec::new(),
        }
    }

    // -- Scheduling --

    /// Schedule the first question and the repeating spawn attempt.
    pub fn start(&mut self, now: f64) {
        self.stop();
        self.first_spawn = Some(self.timers.after(
            now,
            self.spawn.first_question_delay_ms,
            SpawnTask::SpawnQuestion,
        ));
        self.repeat_spawn = Some(self.timers.every(
            now,
            self.spawn.question_interval_ms,
            SpawnTask::SpawnQuestion,
        ));
        log::debug!("spawner started at {:.0}ms", now);
    }

    /// Cancel scheduled spawns. Reveals and drops already queued still run.
    pub fn stop(&mut self) {
        for id in [self.first_spawn.take(), self.repeat_spawn.take()].into_iter().flatten() {
            self.timers.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.repeat_spawn.is_some()
    }

    /// Stop and clear every group and pending task.
    pub fn destroy(&mut self) {
        self.stop();
        self.timers.clear();
        self.groups.clear();
        self.events.clear();
    }

    /// Create a question group unless the concurrency cap is reached or the
    /// pool has nothing for this level.
    pub fn try_spawn_question(&mut self, now: f64) -> Option<GroupId> {
        if self.groups.len() >= self.spawn.max_active_questions {
            log::trace!("spawn skipped: {} groups active", self.groups.len());
            return None;
        }
        let question = self.pool.get_next()?;

        let id = GroupId(self.next_group);
        self.next_group += 1;

        let card = QuestionCard {
            group: id,
            question_id: question.id.clone(),
            text: question.text.clone(),
            position: Vec2::new(self.spawn.question_x, self.cards.question_start_y),
            fall_speed: self.cards.question_fall_speed,
        };
        log::debug!("spawned question {} as group {}", question.id, id.0);

        self.groups.push(QuestionGroup {
            id,
            question,
            card,
            state: GroupState::Spawned,
            spawned_at: now,
            answers: Vec::new(),
            pending: Vec::new(),
            correct_answer: None,
        });
        self.timers
            .after(now, self.spawn.answer_reveal_delay_ms, SpawnTask::RevealAnswers(id));
        self.events.push(GameEvent::QuestionSpawned { group: id });
        Some(id)
    }

    fn reveal_answers(&mut self, group_id: GroupId, now: f64) {
        let Some(index) = self.group_index(group_id) else {
            return;
        };
        let question = &self.groups[index].question;

        let mut entities = select_distractors(&self.catalog, question, &mut self.rng);
        let Some(correct) = self.catalog.get(&question.correct_entity_id) else {
            return;
        };
        entities.push(correct);
        self.rng.shuffle(&mut entities);

        let xs = answer_positions(
            entities.len(),
            self.spawn.answer_band_min_x,
            self.spawn.answer_band_max_x,
        );
        let mut cards = Vec::with_capacity(entities.len());
        for (entity, x) in entities.into_iter().zip(xs) {
            let id = AnswerId(self.next_answer);
            self.next_answer += 1;
            cards.push(AnswerCard::new(
                id,
                group_id,
                entity.id.as_str(),
                entity.name.as_str(),
                entity.id == correct.id,
                Vec2::new(x, self.cards.answer_start_y),
                self.cards.answer_radius,
                self.cards.answer_fall_speed,
            ));
        }

        for (i, card) in cards.iter().enumerate() {
            let delay = self.spawn.answer_stagger_ms * i as f64;
            self.timers
                .after(now, delay, SpawnTask::DropAnswer(group_id, card.id));
        }

        let group = &mut self.groups[index];
        group.correct_answer = cards.iter().find(|c| c.is_correct).map(|c| c.id);
        group.state = GroupState::AnswersRevealed;
        let count = cards.len();
        group.pending = cards;
        log::debug!("group {} revealed {} answers", group_id.0, count);
        self.events.push(GameEvent::AnswersRevealed { group: group_id, count });
    }

    fn drop_answer(&mut self, group_id: GroupId, answer: AnswerId) {
        let Some(index) = self.group_index(group_id) else {
            return;
        };
        let group = &mut self.groups[index];
        if let Some(slot) = group.pending.iter().position(|c| c.id == answer) {
            let card = group.pending.remove(slot);
            group.answers.push(card);
        }
    }

    fn run(&mut self, task: SpawnTask, now: f64) {
        match task {
            SpawnTask::SpawnQuestion => {
                self.try_spawn_question(now);
            }
            SpawnTask::RevealAnswers(group) => self.reveal_answers(group, now),
            SpawnTask::DropAnswer(group, answer) => self.drop_answer(group, answer),
        }
    }

    // -- Frame update --

    /// Move cards, expire groups whose question left the screen, then run due
    /// timers. Returns the groups that expired this frame.
    pub fn update(&mut self, now: f64, delta: f64) -> Vec<GroupId> {
        let drift = self.cards.drift_amplitude;
        let world_height = self.world_height;

        for group in self.groups.iter_mut() {
            group.card.fall(delta);
            for answer in group.answers.iter_mut() {
                answer.fall(now, delta, drift);
            }
            group.answers.retain(|a| !a.is_off_screen(world_height));
        }

        let mut expired = Vec::new();
        self.groups.retain(|group| {
            if group.card.is_off_screen(world_height) {
                expired.push(group.id);
                false
            } else {
                true
            }
        });
        for id in &expired {
            log::debug!("group {} expired", id.0);
        }

        loop {
            let due = self.timers.tick(now);
            if due.is_empty() {
                break;
            }
            for task in due {
                self.run(task, now);
            }
        }

        expired
    }

    // -- Catching --

    /// Detach the caught card and end its group. Siblings, undropped answers
    /// and the question are discarded. `None` if the card is not tracked.
    pub fn resolve_catch(&mut self, answer: AnswerId) -> Option<CatchResolution> {
        let index = self
            .groups
            .iter()
            .position(|g| g.answers.iter().any(|a| a.id == answer))?;
        let group = self.groups.remove(index);

        let mut card = group.answers.into_iter().find(|a| a.id == answer)?;
        card.attach();
        log::debug!(
            "answer {} caught, group {} resolved",
            card.entity_id,
            group.id.0
        );

        Some(CatchResolution {
            group: group.id,
            question_id: group.question.id,
            correct_entity_id: group.question.correct_entity_id,
            card,
        })
    }

    /// First falling answer the circle at `center` touches.
    pub fn find_overlap(&self, center: Vec2, radius: f32) -> Option<AnswerId> {
        self.answers().find(|a| a.overlaps(center, radius)).map(|a| a.id)
    }

    // -- Help --

    /// Highlight the correct answer of the oldest revealed group that is not
    /// highlighted yet. Returns the highlighted answer.
    pub fn highlight_correct(&mut self) -> Option<AnswerId> {
        let group = self.groups.iter_mut().find(|g| {
            g.state == GroupState::AnswersRevealed
                && g.correct_answer.is_some()
                && !g.cards().any(|c| c.highlighted)
        })?;
        let correct = group.correct_answer?;
        for card in group.cards_mut() {
            card.highlighted = card.id == correct;
        }
        self.events.push(GameEvent::HelpHighlight { answer: correct });
        Some(correct)
    }

    // -- Accessors --

    fn group_index(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    pub fn groups(&self) -> &[QuestionGroup] {
        &self.groups
    }

    pub fn active_group_count(&self) -> usize {
        self.groups.len()
    }

    /// Falling answer cards of every group.
    pub fn answers(&self) -> impl Iterator<Item = &AnswerCard> {
        self.groups.iter().flat_map(|g| g.answers.iter())
    }

    pub fn questions(&self) -> impl Iterator<Item = &QuestionCard> {
        self.groups.iter().map(|g| &g.card)
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    pub fn set_level(&mut self, level: u32) {
        self.pool.set_level(level);
    }

    pub fn level(&self) -> u32 {
        self.pool.level()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Evenly spaced x positions inside the band, margins included.
pub fn answer_positions(count: usize, min_x: f32, max_x: f32) -> Vec<f32> {
    let spacing = (max_x - min_x) / (count as f32 + 1.0);
    (0..count).map(|i| min_x + spacing * (i as f32 + 1.0)).collect()
}
