//! Per-operation in-flight bookkeeping.
//!
//! Each async operation gets its own slot. The reducer consults the slot
//! before starting an operation and rejects re-entrant calls; there is no
//! cancellation and no timeout; a request that never resolves leaves its
//! slot occupied.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    Profile,
    AdminGate,
    SeedStatus,
    SeedAction,
    ListPage,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

/// Lifecycle state of one operation slot (mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    /// Clears the slot if `id` is the active task. Returns whether it was.
    /// Results from superseded tasks are dropped by the caller.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub profile: TaskState,
    pub admin_gate: TaskState,
    pub seed_status: TaskState,
    pub seed_action: TaskState,
    pub list_page: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Login => &self.login,
            TaskKind::Profile => &self.profile,
            TaskKind::AdminGate => &self.admin_gate,
            TaskKind::SeedStatus => &self.seed_status,
            TaskKind::SeedAction => &self.seed_action,
            TaskKind::ListPage => &self.list_page,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::Profile => &mut self.profile,
            TaskKind::AdminGate => &mut self.admin_gate,
            TaskKind::SeedStatus => &mut self.seed_status,
            TaskKind::SeedAction => &mut self.seed_action,
            TaskKind::ListPage => &mut self.list_page,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.login.is_running()
            || self.profile.is_running()
            || self.admin_gate.is_running()
            || self.seed_status.is_running()
            || self.seed_action.is_running()
            || self.list_page.is_running()
    }
}
