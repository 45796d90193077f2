use std::path::Path;
use std::sync::Arc;

use pathfinder_core::profile::{PROGRAMMING_LANGUAGES, SKILL_OPTIONS, SPOKEN_LANGUAGES};
use pathfinder_core::responder::{ASSISTANT_GREETING, ROADMAP_WELCOME};
use pathfinder_core::{
    AssistantResponder, AuthState, ChatMessage, ChatReply, Config, Conversation, Dashboard, Field,
    Navigation, Profile, ProfileForm, RoadmapResponder, Route, Router, Session, SessionEvent,
    SubmitError,
};
use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Ticks a notice stays on screen (300ms each)
const NOTICE_TICKS: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// What the text input is currently feeding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Field(Field),
    CustomSkill,
    ResumePath,
    GoTo,
    RoadmapChat,
    AssistantChat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    ProgrammingLanguage,
    SpokenLanguage,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Name,
    Email,
    Location,
    Bio,
    ProgrammingLanguage,
    SpokenLanguage,
    Skills,
    CustomSkill,
    ResumeLink,
    ResumeFile,
    Submit,
}

pub const FORM_ROWS: &[FormRow] = &[
    FormRow::Name,
    FormRow::Email,
    FormRow::Location,
    FormRow::Bio,
    FormRow::ProgrammingLanguage,
    FormRow::SpokenLanguage,
    FormRow::Skills,
    FormRow::CustomSkill,
    FormRow::ResumeLink,
    FormRow::ResumeFile,
    FormRow::Submit,
];

impl FormRow {
    /// Form field the row edits, for values and error messages
    pub fn field(&self) -> Option<Field> {
        match self {
            FormRow::Name => Some(Field::Name),
            FormRow::Email => Some(Field::Email),
            FormRow::Location => Some(Field::Location),
            FormRow::Bio => Some(Field::Bio),
            FormRow::ProgrammingLanguage => Some(Field::ProgrammingLanguage),
            FormRow::SpokenLanguage => Some(Field::SpokenLanguage),
            FormRow::Skills => Some(Field::Skills),
            FormRow::ResumeLink => Some(Field::ResumeLink),
            FormRow::ResumeFile => Some(Field::ResumeFile),
            FormRow::CustomSkill | FormRow::Submit => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormRow::CustomSkill => "Add custom skill",
            FormRow::Submit => "Save profile",
            other => other.field().map(|f| f.label()).unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Roadmap,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub detail: Option<String>,
    ttl: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Go(Route),
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub action: NavAction,
}

/// Navbar entries, numbered 1.. in the header
pub fn navbar(auth: AuthState) -> Vec<NavItem> {
    let mut items = vec![
        NavItem { label: "Home", action: NavAction::Go(Route::Landing) },
        NavItem { label: "Use Case", action: NavAction::Go(Route::UseCase) },
        NavItem { label: "Plans", action: NavAction::Go(Route::Subscription) },
    ];
    match auth {
        AuthState::Unauthenticated => items.extend([
            NavItem { label: "Login", action: NavAction::Go(Route::Login) },
            NavItem { label: "Sign Up", action: NavAction::Go(Route::Signup) },
        ]),
        AuthState::Authenticated => items.extend([
            NavItem { label: "Dashboard", action: NavAction::Go(Route::Dashboard) },
            NavItem { label: "Roadmap", action: NavAction::Go(Route::Roadmap) },
            NavItem { label: "Profile", action: NavAction::Go(Route::Profile) },
            NavItem { label: "Logout", action: NavAction::Logout },
        ]),
    }
    items
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Single line editor with a character based cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }
}

pub struct App {
    pub should_quit: bool,
    pub session: Session,
    pub router: Router,
    pub profile: Option<Profile>,

    // Text input
    pub input_mode: InputMode,
    pub input_target: Option<InputTarget>,
    pub input: TextInput,

    // Profile form (setup view and the inline editor)
    pub form: ProfileForm,
    pub form_state: ListState,
    pub show_profile_editor: bool,
    pub picker: Option<PickerKind>,
    pub picker_state: ListState,

    // Chats
    pub roadmap_chat: Conversation,
    pub assistant: Conversation,
    pub show_assistant: bool,
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,

    // Dashboard
    pub dashboard: Dashboard,
    pub dashboard_state: ListState,

    // Static pages
    pub content_scroll: u16,

    pub notice: Option<Notice>,
    pub animation_frame: u8, // 0-2 for ellipsis animation
    reply_tx: Option<mpsc::UnboundedSender<ChatReply>>,
}

impl App {
    pub fn new(session: Session, config: &Config) -> Self {
        let mut form_state = ListState::default();
        form_state.select(Some(0));
        let mut dashboard_state = ListState::default();
        dashboard_state.select(Some(0));

        Self {
            should_quit: false,
            router: Router::new(session.clone()),
            profile: session.profile(),
            session,
            input_mode: InputMode::Normal,
            input_target: None,
            input: TextInput::default(),
            form: ProfileForm::new(),
            form_state,
            show_profile_editor: false,
            picker: None,
            picker_state: ListState::default(),
            roadmap_chat: Conversation::new(
                Arc::new(RoadmapResponder),
                ROADMAP_WELCOME,
                config.reply_delay(),
            ),
            assistant: Conversation::new(
                Arc::new(AssistantResponder),
                ASSISTANT_GREETING,
                config.assistant_delay(),
            ),
            show_assistant: false,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            dashboard: Dashboard::default(),
            dashboard_state,
            content_scroll: 0,
            notice: None,
            animation_frame: 0,
            reply_tx: None,
        }
    }

    /// Chat timers deliver their replies through this sender
    pub fn set_reply_sender(&mut self, tx: mpsc::UnboundedSender<ChatReply>) {
        self.reply_tx = Some(tx);
    }

    pub fn route(&self) -> Route {
        self.router.route()
    }

    pub fn auth_state(&self) -> AuthState {
        self.router.auth_state()
    }

    pub fn navbar(&self) -> Vec<NavItem> {
        navbar(self.auth_state())
    }

    // Navigation

    pub fn navigate(&mut self, path: &str) {
        let before = self.route();
        let nav = self.router.navigate(path);
        self.after_navigation(before, nav);
    }

    pub fn go(&mut self, route: Route) {
        self.navigate(route.path());
    }

    pub fn back(&mut self) {
        let before = self.route();
        if let Some(nav) = self.router.back() {
            self.after_navigation(before, nav);
        }
    }

    /// Activate the navbar entry at `index` (0-based)
    pub fn select_nav(&mut self, index: usize) {
        match self.navbar().get(index).map(|item| item.action) {
            Some(NavAction::Go(route)) => self.go(route),
            Some(NavAction::Logout) => self.logout(),
            None => {}
        }
    }

    fn after_navigation(&mut self, before: Route, nav: Navigation) {
        if let Navigation::Redirected { to, from } = &nav {
            if to.route == Route::Login {
                self.info("Please log in to continue", Some(format!("{} needs a profile", from)));
            }
        }
        let now = self.route();
        if now != before {
            self.on_view_change(before, now);
        }
    }

    fn on_view_change(&mut self, from: Route, to: Route) {
        debug!(?from, ?to, "view changed");
        if from == Route::Roadmap {
            // Late answers for the old view are dropped by generation
            self.roadmap_chat.reset();
        }
        if self.input_target != Some(InputTarget::AssistantChat) {
            self.cancel_input();
        }
        self.picker = None;
        self.show_profile_editor = false;
        self.content_scroll = 0;
        self.chat_scroll = 0;

        if to == Route::ProfileSetup {
            self.form = self.seeded_form();
            self.form_state.select(Some(0));
        }
    }

    pub fn on_session_event(&mut self, event: SessionEvent) {
        self.profile = self.session.profile();
        let before = self.route();
        if let Some(nav) = self.router.reevaluate() {
            info!(?event, route = ?nav.location().route, "session change moved the view");
            self.after_navigation(before, nav);
        }
        if event == SessionEvent::ExternalChange {
            self.info("Your session changed in another window", None);
        }
    }

    pub fn logout(&mut self) {
        match self.session.sign_out() {
            Ok(()) => {
                self.profile = None;
                self.go(Route::Landing);
                self.info("Logged out", Some("Your profile was removed from this device.".to_string()));
            }
            Err(e) => {
                warn!("logout failed: {}", e);
                self.error("Could not log out", Some(e.to_string()));
            }
        }
    }

    // Profile form

    fn seeded_form(&self) -> ProfileForm {
        self.profile
            .as_ref()
            .map(ProfileForm::from_profile)
            .unwrap_or_default()
    }

    /// Open the inline profile editor on the dashboard or profile view
    pub fn toggle_profile_editor(&mut self) {
        self.show_profile_editor = !self.show_profile_editor;
        if self.show_profile_editor {
            self.form = self.seeded_form();
            self.form_state.select(Some(0));
        }
    }

    pub fn form_visible(&self) -> bool {
        self.route() == Route::ProfileSetup
            || (self.show_profile_editor && matches!(self.route(), Route::Dashboard | Route::Profile))
    }

    pub fn form_row(&self) -> FormRow {
        let idx = self.form_state.selected().unwrap_or(0).min(FORM_ROWS.len() - 1);
        FORM_ROWS[idx]
    }

    pub fn form_next(&mut self) {
        let i = self.form_state.selected().map_or(0, |i| (i + 1).min(FORM_ROWS.len() - 1));
        self.form_state.select(Some(i));
    }

    pub fn form_prev(&mut self) {
        let i = self.form_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.form_state.select(Some(i));
    }

    pub fn activate_form_row(&mut self) {
        match self.form_row() {
            FormRow::ProgrammingLanguage => self.open_picker(PickerKind::ProgrammingLanguage),
            FormRow::SpokenLanguage => self.open_picker(PickerKind::SpokenLanguage),
            FormRow::Skills => self.open_picker(PickerKind::Skills),
            FormRow::CustomSkill => self.begin_editing(InputTarget::CustomSkill, ""),
            FormRow::ResumeFile => self.begin_editing(InputTarget::ResumePath, ""),
            FormRow::Submit => self.submit_form(),
            row => {
                if let Some(field) = row.field() {
                    let current = self.form.text(field).to_string();
                    self.begin_editing(InputTarget::Field(field), &current);
                }
            }
        }
    }

    /// Clear the selected row where that means something
    pub fn clear_form_row(&mut self) {
        match self.form_row() {
            FormRow::ResumeFile => self.form.detach_resume(),
            row => {
                if let Some(field) = row.field().filter(|f| f.is_text()) {
                    self.form.set_text(field, "");
                }
            }
        }
    }

    pub fn submit_form(&mut self) {
        match self.form.submit(&self.session) {
            Ok(profile) => {
                self.profile = Some(profile);
                if self.route() == Route::ProfileSetup {
                    self.success("Profile setup complete!", Some("Your personalized dashboard is ready."));
                    let before = self.route();
                    let nav = self.router.resume_after_login();
                    self.after_navigation(before, nav);
                } else {
                    self.show_profile_editor = false;
                    self.success("Profile updated!", Some("Your profile information has been saved."));
                }
            }
            Err(SubmitError::Invalid(errors)) => {
                self.error("Please fix the highlighted fields", Some(errors.to_string()));
            }
            Err(SubmitError::Storage(e)) => {
                warn!("profile save failed: {}", e);
                self.error("Could not save profile", Some(e.to_string()));
            }
        }
    }

    // Pickers

    pub fn open_picker(&mut self, kind: PickerKind) {
        let current = match kind {
            PickerKind::ProgrammingLanguage => self.form.programming_language(),
            PickerKind::SpokenLanguage => self.form.spoken_language(),
            PickerKind::Skills => None,
        };
        let selected = current
            .and_then(|c| self.picker_items_for(kind).iter().position(|item| item == c))
            .unwrap_or(0);
        self.picker = Some(kind);
        self.picker_state.select(Some(selected));
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    /// Catalog entries, plus custom skills at the end of the skills list
    pub fn picker_items_for(&self, kind: PickerKind) -> Vec<String> {
        let catalog = match kind {
            PickerKind::ProgrammingLanguage => PROGRAMMING_LANGUAGES,
            PickerKind::SpokenLanguage => SPOKEN_LANGUAGES,
            PickerKind::Skills => SKILL_OPTIONS,
        };
        let mut items: Vec<String> = catalog.iter().map(|s| s.to_string()).collect();
        if kind == PickerKind::Skills {
            items.extend(
                self.form
                    .skills()
                    .iter()
                    .filter(|s| !SKILL_OPTIONS.contains(&s.as_str()))
                    .cloned(),
            );
        }
        items
    }

    pub fn picker_next(&mut self) {
        if let Some(kind) = self.picker {
            let len = self.picker_items_for(kind).len();
            if len > 0 {
                let i = self.picker_state.selected().map_or(0, |i| (i + 1) % len);
                self.picker_state.select(Some(i));
            }
        }
    }

    pub fn picker_prev(&mut self) {
        if let Some(kind) = self.picker {
            let len = self.picker_items_for(kind).len();
            if len > 0 {
                let i = self.picker_state.selected().map_or(0, |i| (i + len - 1) % len);
                self.picker_state.select(Some(i));
            }
        }
    }

    /// Languages close the picker; skills toggle and keep it open
    pub fn picker_choose(&mut self) {
        let Some(kind) = self.picker else { return };
        let items = self.picker_items_for(kind);
        let Some(choice) = self.picker_state.selected().and_then(|i| items.get(i)) else {
            return;
        };
        match kind {
            PickerKind::ProgrammingLanguage => {
                self.form.select_programming_language(choice);
                self.picker = None;
            }
            PickerKind::SpokenLanguage => {
                self.form.select_spoken_language(choice);
                self.picker = None;
            }
            PickerKind::Skills => {
                if SKILL_OPTIONS.contains(&choice.as_str()) {
                    self.form.toggle_skill(choice);
                } else {
                    self.form.remove_skill(choice);
                    let len = self.picker_items_for(kind).len();
                    if let Some(i) = self.picker_state.selected() {
                        self.picker_state.select(Some(i.min(len.saturating_sub(1))));
                    }
                }
            }
        }
    }

    // Text input

    pub fn begin_editing(&mut self, target: InputTarget, initial: &str) {
        self.input = TextInput::with_value(initial);
        self.input_target = Some(target);
        self.input_mode = InputMode::Editing;
    }

    pub fn cancel_input(&mut self) {
        self.input = TextInput::default();
        self.input_target = None;
        self.input_mode = InputMode::Normal;
    }

    /// Hand the typed text to whatever asked for it
    pub fn commit_input(&mut self) {
        let Some(target) = self.input_target else {
            self.input_mode = InputMode::Normal;
            return;
        };

        // Keep the draft while an answer is still on its way
        let chat_busy = match target {
            InputTarget::RoadmapChat => self.roadmap_chat.is_pending(),
            InputTarget::AssistantChat => self.assistant.is_pending(),
            _ => false,
        };
        if chat_busy {
            return;
        }

        let value = self.input.take();
        self.input_target = None;
        self.input_mode = InputMode::Normal;

        match target {
            InputTarget::Field(field) => self.form.set_text(field, value),
            InputTarget::CustomSkill => match self.form.add_custom_skill(&value) {
                Ok(_) => {}
                Err(notice) => self.error(&notice.to_string(), None),
            },
            InputTarget::ResumePath => {
                let path = value.trim();
                if !path.is_empty() {
                    match self.form.attach_resume_path(Path::new(path)) {
                        Ok(()) => self.success("Resume attached", None),
                        Err(notice) => self.error(&notice.to_string(), None),
                    }
                }
            }
            InputTarget::GoTo => {
                let path = value.trim();
                let path = if path.is_empty() { "/" } else { path };
                self.navigate(path);
            }
            InputTarget::RoadmapChat => self.send_chat(ChatKind::Roadmap, &value),
            InputTarget::AssistantChat => self.send_chat(ChatKind::Assistant, &value),
        }
    }

    // Chats

    pub fn send_chat(&mut self, kind: ChatKind, text: &str) {
        let conversation = match kind {
            ChatKind::Roadmap => &mut self.roadmap_chat,
            ChatKind::Assistant => &mut self.assistant,
        };
        let Some(pending) = conversation.submit(text) else {
            return;
        };
        match &self.reply_tx {
            Some(tx) => pending.spawn(tx.clone()),
            None => warn!("no reply channel, answer will never arrive"),
        }
        if kind == ChatKind::Roadmap {
            self.scroll_chat_to_bottom();
        }
    }

    pub fn deliver_reply(&mut self, reply: ChatReply) {
        if self.roadmap_chat.deliver(&reply) {
            self.success("Roadmap generated!", Some("Your personalized learning path is ready."));
            self.scroll_chat_to_bottom();
        } else if !self.assistant.deliver(&reply) {
            debug!(generation = reply.generation, "dropping reply for a closed view");
        }
    }

    pub fn toggle_assistant(&mut self) {
        self.show_assistant = !self.show_assistant;
        if !self.show_assistant && self.input_target == Some(InputTarget::AssistantChat) {
            self.cancel_input();
        }
    }

    /// Scroll the roadmap chat so the newest message is visible
    pub fn scroll_chat_to_bottom(&mut self) {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            60
        };

        let total_lines = chat_line_count(self.roadmap_chat.messages(), self.roadmap_chat.is_pending(), wrap_width);
        self.chat_scroll = total_lines.saturating_sub(self.chat_height);
    }

    // Dashboard

    pub fn dashboard_next(&mut self) {
        let len = self.dashboard.items().len();
        let i = self.dashboard_state.selected().map_or(0, |i| (i + 1).min(len.saturating_sub(1)));
        self.dashboard_state.select(Some(i));
    }

    pub fn dashboard_prev(&mut self) {
        let i = self.dashboard_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.dashboard_state.select(Some(i));
    }

    pub fn toggle_selected_item(&mut self) {
        let id = self
            .dashboard_state
            .selected()
            .and_then(|i| self.dashboard.items().get(i))
            .map(|item| item.id);
        if let Some(id) = id {
            self.dashboard.toggle_expand(id);
        }
    }

    // Scrolling

    pub fn scroll_down(&mut self, amount: u16) {
        if self.route() == Route::Roadmap {
            self.chat_scroll = self.chat_scroll.saturating_add(amount);
        } else {
            self.content_scroll = self.content_scroll.saturating_add(amount);
        }
    }

    pub fn scroll_up(&mut self, amount: u16) {
        if self.route() == Route::Roadmap {
            self.chat_scroll = self.chat_scroll.saturating_sub(amount);
        } else {
            self.content_scroll = self.content_scroll.saturating_sub(amount);
        }
    }

    // Notices

    fn notify(&mut self, kind: NoticeKind, title: &str, detail: Option<String>) {
        self.notice = Some(Notice {
            kind,
            title: title.to_string(),
            detail,
            ttl: NOTICE_TICKS,
        });
    }

    pub fn info(&mut self, title: &str, detail: Option<String>) {
        self.notify(NoticeKind::Info, title, detail);
    }

    pub fn success(&mut self, title: &str, detail: Option<&str>) {
        self.notify(NoticeKind::Success, title, detail.map(str::to_string));
    }

    pub fn error(&mut self, title: &str, detail: Option<String>) {
        self.notify(NoticeKind::Error, title, detail);
    }

    pub fn tick(&mut self) {
        if self.roadmap_chat.is_pending() || self.assistant.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        if let Some(notice) = &mut self.notice {
            notice.ttl = notice.ttl.saturating_sub(1);
            if notice.ttl == 0 {
                self.notice = None;
            }
        }
    }
}

/// Rendered line count of a chat: author line, wrapped body, blank line
pub fn chat_line_count(messages: &[ChatMessage], pending: bool, wrap_width: usize) -> u16 {
    let wrap_width = wrap_width.max(1);
    let mut total_lines: u16 = 0;
    for msg in messages {
        total_lines = total_lines.saturating_add(1);
        for line in msg.text.lines() {
            let char_count = line.chars().count();
            let wrapped = if char_count == 0 { 1 } else { char_count.div_ceil(wrap_width) };
            total_lines = total_lines.saturating_add(wrapped as u16);
        }
        total_lines = total_lines.saturating_add(1);
    }
    if pending {
        total_lines = total_lines.saturating_add(2);
    }
    total_lines
}
