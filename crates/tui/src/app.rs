use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::debug;

use fleetsim_core::{
    config::AppConfig,
    session::{ActionError, SessionState, VehicleAction},
    vehicle::{
        input::{self, InputError},
        Direction as TurnDirection, NewVehicle, NewVehicleKind, Vehicle, Wheel,
    },
};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_LOG_LINES: usize = 200;
const MAX_FIELD_LEN: usize = 48;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            danger: Color::Red,
        }
    }
}

/// Menu screens of the session. Each corresponds to a single outstanding
/// prompt; there is never more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    CreateType,
    CreateForm,
    SelectVehicle,
    Actions,
    TowSelect,
}

enum AppEvent {
    Input(Event),
    Tick,
}

const HOME_ITEMS: [&str; 3] = [
    "Create a new vehicle",
    "Select an existing vehicle",
    "Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CreateKind {
    Car,
    Truck,
    Motorbike,
}

const CREATE_KINDS: [CreateKind; 3] = [CreateKind::Car, CreateKind::Truck, CreateKind::Motorbike];

impl CreateKind {
    fn label(self) -> &'static str {
        match self {
            CreateKind::Car => "Car",
            CreateKind::Truck => "Truck",
            CreateKind::Motorbike => "Motorbike",
        }
    }
}

#[derive(Debug, Clone)]
struct FormField {
    label: &'static str,
    value: String,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }
}

/// Field-by-field creation form for one vehicle. Values stay free text
/// until submit, where they are validated into a `NewVehicle`.
#[derive(Debug, Clone)]
struct CreateForm {
    kind: CreateKind,
    fields: Vec<FormField>,
    cursor: usize,
}

impl CreateForm {
    fn new(kind: CreateKind) -> Self {
        let mut fields = vec![
            FormField::new("Color"),
            FormField::new("Make"),
            FormField::new("Model"),
            FormField::new("Year"),
            FormField::new("Weight (lbs)"),
            FormField::new("Top speed (MPH)"),
        ];
        match kind {
            CreateKind::Car => {}
            CreateKind::Truck => fields.push(FormField::new("Towing capacity (lbs)")),
            CreateKind::Motorbike => fields.extend([
                FormField::new("Front wheel diameter (in)"),
                FormField::new("Front wheel brand"),
                FormField::new("Rear wheel diameter (in)"),
                FormField::new("Rear wheel brand"),
            ]),
        }
        Self {
            kind,
            fields,
            cursor: 0,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        self.cursor = clamp_cursor(self.cursor, delta, self.fields.len());
    }

    fn is_last(&self) -> bool {
        self.cursor + 1 == self.fields.len()
    }

    fn insert(&mut self, ch: char) {
        let field = &mut self.fields[self.cursor];
        if field.value.len() >= MAX_FIELD_LEN {
            return;
        }
        if ch.is_ascii() && !ch.is_ascii_control() {
            field.value.push(ch);
        }
    }

    fn backspace(&mut self) {
        self.fields[self.cursor].value.pop();
    }

    fn focus(&mut self, label: &str) {
        if let Some(pos) = self.fields.iter().position(|field| field.label == label) {
            self.cursor = pos;
        }
    }

    fn submit(&self) -> Result<NewVehicle, InputError> {
        let raw = |idx: usize| self.fields[idx].value.as_str();
        let color = input::text_field(self.fields[0].label, raw(0))?;
        let make = input::text_field(self.fields[1].label, raw(1))?;
        let model = input::text_field(self.fields[2].label, raw(2))?;
        let year = input::year_field(self.fields[3].label, raw(3))?;
        let weight = input::positive_field(self.fields[4].label, raw(4))?;
        let top_speed = input::positive_field(self.fields[5].label, raw(5))?;

        let kind = match self.kind {
            CreateKind::Car => NewVehicleKind::Car,
            CreateKind::Truck => NewVehicleKind::Truck {
                towing_capacity: input::positive_field(self.fields[6].label, raw(6))?,
            },
            CreateKind::Motorbike => {
                let front = Wheel::new(
                    input::positive_field(self.fields[6].label, raw(6))?,
                    input::text_field(self.fields[7].label, raw(7))?,
                );
                let rear = Wheel::new(
                    input::positive_field(self.fields[8].label, raw(8))?,
                    input::text_field(self.fields[9].label, raw(9))?,
                );
                NewVehicleKind::Motorbike { front, rear }
            }
        };

        Ok(NewVehicle {
            color,
            make,
            model,
            year,
            weight,
            top_speed,
            kind,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionItem {
    PrintDetails,
    Start,
    Accelerate,
    Decelerate,
    Stop,
    TurnRight,
    TurnLeft,
    Reverse,
    Tow,
    Wheelie,
    SwitchVehicle,
    Exit,
}

const ACTION_ITEMS: [ActionItem; 12] = [
    ActionItem::PrintDetails,
    ActionItem::Start,
    ActionItem::Accelerate,
    ActionItem::Decelerate,
    ActionItem::Stop,
    ActionItem::TurnRight,
    ActionItem::TurnLeft,
    ActionItem::Reverse,
    ActionItem::Tow,
    ActionItem::Wheelie,
    ActionItem::SwitchVehicle,
    ActionItem::Exit,
];

impl ActionItem {
    fn label(self, step: u32) -> String {
        match self {
            ActionItem::PrintDetails => "Print details".to_string(),
            ActionItem::Start => "Start vehicle".to_string(),
            ActionItem::Accelerate => format!("Accelerate {step} MPH"),
            ActionItem::Decelerate => format!("Decelerate {step} MPH"),
            ActionItem::Stop => "Stop vehicle".to_string(),
            ActionItem::TurnRight => "Turn right".to_string(),
            ActionItem::TurnLeft => "Turn left".to_string(),
            ActionItem::Reverse => "Reverse".to_string(),
            ActionItem::Tow => "Tow a vehicle".to_string(),
            ActionItem::Wheelie => "Perform a wheelie".to_string(),
            ActionItem::SwitchVehicle => "Select or create another vehicle".to_string(),
            ActionItem::Exit => "Exit".to_string(),
        }
    }
}

/// Cursor plus scroll offset for a roster list.
#[derive(Debug, Clone, Copy, Default)]
struct ListNav {
    cursor: usize,
    offset: usize,
}

impl ListNav {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn step(&mut self, delta: isize, total: usize, visible: usize) {
        if total == 0 {
            self.reset();
            return;
        }
        self.cursor = clamp_cursor(self.cursor, delta, total);

        let visible = visible.max(1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + visible {
            self.offset = self.cursor + 1 - visible;
        }
        let max_offset = total.saturating_sub(visible);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

/// High-level application state for the terminal front-end.
pub struct FleetApp {
    config: AppConfig,
    session: SessionState,
    screen: Screen,
    status: String,
    log: Vec<String>,
    home_cursor: usize,
    type_cursor: usize,
    action_cursor: usize,
    select_nav: ListNav,
    tow_nav: ListNav,
    form: Option<CreateForm>,
    list_height: usize,
    should_quit: bool,
    theme: Theme,
}

impl FleetApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            session: SessionState::new(),
            screen: Screen::Home,
            status: "The fleet is empty; create a vehicle to get started".to_string(),
            log: Vec::new(),
            home_cursor: 0,
            type_cursor: 0,
            action_cursor: 0,
            select_nav: ListNav::default(),
            tow_nav: ListNav::default(),
            form: None,
            list_height: 10,
            should_quit: false,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }
            match event_rx.recv().await {
                Some(AppEvent::Input(event)) => self.handle_input(event),
                Some(AppEvent::Tick) => {}
                None => break,
            }
            if self.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn handle_input(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::CreateType => self.handle_create_type_key(key),
            Screen::CreateForm => self.handle_form_key(key),
            Screen::SelectVehicle => self.handle_select_key(key),
            Screen::Actions => self.handle_actions_key(key),
            Screen::TowSelect => self.handle_tow_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.session.request_exit();
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.home_cursor = clamp_cursor(self.home_cursor, 1, HOME_ITEMS.len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.home_cursor = clamp_cursor(self.home_cursor, -1, HOME_ITEMS.len());
            }
            KeyCode::Enter => match self.home_cursor {
                0 => {
                    self.type_cursor = 0;
                    self.screen = Screen::CreateType;
                    self.status = "Select a vehicle type".to_string();
                }
                1 => {
                    if self.session.fleet().is_empty() {
                        self.status = "No vehicles in the fleet yet; create one first".to_string();
                    } else {
                        self.select_nav.reset();
                        self.screen = Screen::SelectVehicle;
                        self.status = "Select a vehicle to perform an action on".to_string();
                    }
                }
                2 => {
                    self.session.request_exit();
                    self.should_quit = true;
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_create_type_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Home;
                self.status = "Returned to the main menu".to_string();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.type_cursor = clamp_cursor(self.type_cursor, 1, CREATE_KINDS.len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.type_cursor = clamp_cursor(self.type_cursor, -1, CREATE_KINDS.len());
            }
            KeyCode::Enter => {
                let kind = CREATE_KINDS[self.type_cursor];
                self.form = Some(CreateForm::new(kind));
                self.screen = Screen::CreateForm;
                self.status = format!("Enter the details for the new {}", kind.label());
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            self.screen = Screen::Home;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                self.screen = Screen::CreateType;
                self.status = "Vehicle creation cancelled".to_string();
            }
            KeyCode::Up => form.move_cursor(-1),
            KeyCode::Down | KeyCode::Tab => form.move_cursor(1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if !form.is_last() {
                    form.move_cursor(1);
                } else {
                    match form.submit() {
                        Err(err) => {
                            form.focus(err.field());
                            self.status = err.to_string();
                            debug!(%err, "creation form rejected");
                        }
                        Ok(new_vehicle) => {
                            self.form = None;
                            let summary = {
                                let vehicle = self.session.create_vehicle(new_vehicle);
                                format!(
                                    "Created {} {} ({})",
                                    vehicle.kind.label(),
                                    vehicle.describe(),
                                    vehicle.vin
                                )
                            };
                            self.push_log(summary.clone());
                            self.status = summary;
                            self.action_cursor = 0;
                            self.screen = Screen::Actions;
                        }
                    }
                }
            }
            KeyCode::Char(ch) => form.insert(ch),
            _ => {}
        }
    }

    fn handle_select_key(&mut self, key: KeyEvent) {
        let total = self.session.fleet().len();
        let visible = self.list_height.max(1);
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Home;
                self.status = "Returned to the main menu".to_string();
            }
            KeyCode::Char('j') | KeyCode::Down => self.select_nav.step(1, total, visible),
            KeyCode::Char('k') | KeyCode::Up => self.select_nav.step(-1, total, visible),
            KeyCode::Enter => {
                let chosen = self
                    .session
                    .fleet()
                    .iter()
                    .nth(self.select_nav.cursor)
                    .map(|vehicle| vehicle.vin.clone());
                if let Some(vin) = chosen {
                    match self.session.select(&vin) {
                        Ok(()) => {
                            let label = self
                                .session
                                .selected()
                                .map(|vehicle| vehicle.describe())
                                .unwrap_or_else(|| vin.clone());
                            self.status = format!("Selected {label}");
                            self.action_cursor = 0;
                            self.screen = Screen::Actions;
                        }
                        Err(err) => self.report_action_error(err),
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_actions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.home_cursor = 0;
                self.screen = Screen::Home;
                self.status = "Select or create another vehicle".to_string();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.action_cursor = clamp_cursor(self.action_cursor, 1, ACTION_ITEMS.len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.action_cursor = clamp_cursor(self.action_cursor, -1, ACTION_ITEMS.len());
            }
            KeyCode::Enter => self.invoke_action(ACTION_ITEMS[self.action_cursor]),
            _ => {}
        }
    }

    fn invoke_action(&mut self, item: ActionItem) {
        let step = self.config.speed_step_mph;
        match item {
            ActionItem::PrintDetails => self.invoke(VehicleAction::PrintDetails),
            ActionItem::Start => self.invoke(VehicleAction::Start),
            ActionItem::Accelerate => self.invoke(VehicleAction::Accelerate(step)),
            ActionItem::Decelerate => self.invoke(VehicleAction::Decelerate(step)),
            ActionItem::Stop => self.invoke(VehicleAction::Stop),
            ActionItem::TurnRight => self.invoke(VehicleAction::Turn(TurnDirection::Right)),
            ActionItem::TurnLeft => self.invoke(VehicleAction::Turn(TurnDirection::Left)),
            ActionItem::Reverse => self.invoke(VehicleAction::Reverse),
            ActionItem::Wheelie => self.invoke(VehicleAction::Wheelie),
            ActionItem::Tow => match self.session.begin_tow() {
                Ok(()) => {
                    self.tow_nav.reset();
                    self.screen = Screen::TowSelect;
                    self.status = "Select a vehicle to tow".to_string();
                }
                Err(err) => self.report_action_error(err),
            },
            ActionItem::SwitchVehicle => {
                self.home_cursor = 0;
                self.screen = Screen::Home;
                self.status = "Create a new vehicle or select an existing one".to_string();
            }
            ActionItem::Exit => {
                self.session.request_exit();
                self.should_quit = true;
            }
        }
    }

    fn invoke(&mut self, action: VehicleAction) {
        match self.session.perform(action) {
            Ok(lines) => {
                if lines.len() == 1 {
                    self.status.clone_from(&lines[0]);
                } else {
                    let label = self
                        .session
                        .selected()
                        .map(|vehicle| vehicle.describe())
                        .unwrap_or_default();
                    self.status = format!("Printed details for {label}");
                }
                for line in lines {
                    self.push_log(line);
                }
            }
            Err(err) => self.report_action_error(err),
        }
    }

    fn handle_tow_key(&mut self, key: KeyEvent) {
        let total = self.session.fleet().len();
        let visible = self.list_height.max(1);
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Actions;
                self.status = "Tow cancelled".to_string();
            }
            KeyCode::Char('j') | KeyCode::Down => self.tow_nav.step(1, total, visible),
            KeyCode::Char('k') | KeyCode::Up => self.tow_nav.step(-1, total, visible),
            KeyCode::Enter => {
                let chosen = self
                    .session
                    .fleet()
                    .iter()
                    .nth(self.tow_nav.cursor)
                    .map(|vehicle| vehicle.vin.clone());
                if let Some(vin) = chosen {
                    match self.session.tow(&vin) {
                        Ok(message) => {
                            self.push_log(message.clone());
                            self.status = message;
                        }
                        Err(err) => self.report_action_error(err),
                    }
                    self.screen = Screen::Actions;
                }
            }
            _ => {}
        }
    }

    fn report_action_error(&mut self, err: ActionError) {
        debug!(%err, "action rejected");
        self.status = err.to_string();
    }

    fn push_log(&mut self, line: String) {
        self.log
            .push(format!("{}  {line}", Local::now().format("%H:%M:%S")));
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        match self.screen {
            Screen::Home => self.draw_home(frame),
            Screen::CreateType => self.draw_create_type(frame),
            Screen::CreateForm => self.draw_form(frame),
            Screen::SelectVehicle => self.draw_roster(frame, "Select a Vehicle", false),
            Screen::Actions => self.draw_actions(frame),
            Screen::TowSelect => self.draw_roster(frame, "Select a Vehicle to Tow", true),
        }
    }

    fn draw_home(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let mut constraints = Vec::new();
        if self.config.show_banner {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(3));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut chunk_iter = chunks.iter();
        if self.config.show_banner {
            if let Some(banner_area) = chunk_iter.next() {
                self.render_banner(frame, *banner_area);
            }
        }
        let body = chunk_iter.next().copied().unwrap_or(area);
        let status = chunk_iter.next().copied().unwrap_or(area);

        let menu_height = (HOME_ITEMS.len() as u16 + 2).min(body.height);
        let menu_area = centered_rect(36.min(body.width.max(1)), menu_height, body);
        let lines = self.menu_lines(&HOME_ITEMS, self.home_cursor);
        let menu = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Fleet Menu"))
            .alignment(Alignment::Left);
        frame.render_widget(menu, menu_area);

        self.render_status(frame, status);
    }

    fn draw_create_type(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        let labels: Vec<&str> = CREATE_KINDS.iter().map(|kind| kind.label()).collect();
        let menu_height = (labels.len() as u16 + 2).min(chunks[0].height);
        let menu_area = centered_rect(30.min(chunks[0].width.max(1)), menu_height, chunks[0]);
        let lines = self.menu_lines(&labels, self.type_cursor);
        let menu = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Vehicle Type"))
            .alignment(Alignment::Left);
        frame.render_widget(menu, menu_area);

        self.render_status(frame, chunks[1]);
    }

    fn draw_form(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(3)])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        let Some(form) = self.form.as_ref() else {
            return;
        };

        let mut lines = Vec::with_capacity(form.fields.len());
        for (idx, field) in form.fields.iter().enumerate() {
            let focused = idx == form.cursor;
            let marker = if focused { "▶ " } else { "  " };
            let cursor = if focused { "▌" } else { "" };
            let style = if focused {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.primary_fg)
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}: {}{cursor}", field.label, field.value),
                style,
            )));
        }
        let title = format!("New {}", form.kind.label());
        let form_widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(form_widget, body[0]);

        let help = Paragraph::new(vec![
            Line::from("Type to fill the highlighted field."),
            Line::from("Enter advances; on the last field it submits."),
            Line::from("Up/Down or Tab move between fields."),
            Line::from("Esc cancels."),
        ])
        .style(Style::default().fg(self.theme.muted))
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
        frame.render_widget(help, body[1]);

        self.render_status(frame, chunks[1]);
    }

    fn draw_roster(&mut self, frame: &mut Frame, title: &str, towing: bool) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[0]);

        self.list_height = body[0].height.saturating_sub(2) as usize;
        let nav = if towing { self.tow_nav } else { self.select_nav };
        let total = self.session.fleet().len();
        let visible = self.list_height.max(1);

        let mut list_state = ListState::default();
        if total > 0 {
            list_state.select(Some(nav.cursor.saturating_sub(nav.offset)));
        }

        let items: Vec<ListItem> = if total == 0 {
            vec![ListItem::new(Line::from("  The fleet is empty"))]
        } else {
            let end = (nav.offset + visible).min(total);
            self.session
                .fleet()
                .iter()
                .enumerate()
                .skip(nav.offset)
                .take(end - nav.offset)
                .map(|(idx, vehicle)| {
                    let marker = if idx == nav.cursor {
                        Span::styled("▶ ", Style::default().fg(self.theme.accent))
                    } else {
                        Span::raw("  ")
                    };
                    ListItem::new(Line::from(vec![marker, Span::raw(vehicle.roster_label())]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title.to_string()),
            )
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, body[0], &mut list_state);

        let hovered = self.session.fleet().iter().nth(nav.cursor);
        self.render_vehicle_panel(frame, body[1], hovered);

        self.render_status(frame, chunks[1]);
    }

    fn draw_actions(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(20)])
            .split(chunks[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body[1]);

        let step = self.config.speed_step_mph;
        let labels: Vec<String> = ACTION_ITEMS.iter().map(|item| item.label(step)).collect();
        let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let lines = self.menu_lines(&label_refs, self.action_cursor);
        let menu = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Actions"))
            .alignment(Alignment::Left);
        frame.render_widget(menu, body[0]);

        let selected = self.session.selected();
        self.render_vehicle_panel(frame, right[0], selected);
        self.render_log(frame, right[1]);

        self.render_status(frame, chunks[1]);
    }

    fn menu_lines(&self, items: &[&str], cursor: usize) -> Vec<Line<'static>> {
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if idx == cursor {
                    Line::from(Span::styled(
                        format!("▶ {item}"),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {item}"),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect()
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect) {
        let banner = Paragraph::new(Line::from(Span::styled(
            "F L E E T S I M",
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, area);
    }

    fn render_vehicle_panel(&self, frame: &mut Frame, area: Rect, vehicle: Option<&Vehicle>) {
        let lines: Vec<Line> = match vehicle {
            Some(vehicle) => vehicle.details().into_iter().map(Line::from).collect(),
            None => vec![Line::from(Span::styled(
                "No vehicle selected",
                Style::default().fg(self.theme.muted),
            ))],
        };
        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Vehicle"))
            .wrap(Wrap { trim: false });
        frame.render_widget(panel, area);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.log.len().saturating_sub(visible.max(1));
        let lines: Vec<Line> = self.log[start..]
            .iter()
            .map(|entry| Line::from(entry.clone()))
            .collect();
        let log = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Activity"))
            .wrap(Wrap { trim: false });
        frame.render_widget(log, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let style = if self.status.contains("cannot") || self.status.contains("must") {
            Style::default().fg(self.theme.danger)
        } else {
            Style::default().fg(self.theme.primary_fg)
        };
        let status = Paragraph::new(Line::from(Span::styled(self.status.clone(), style)))
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, area);
    }
}

fn clamp_cursor(cursor: usize, delta: isize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let mut idx = cursor as isize + delta;
    if idx < 0 {
        idx = 0;
    } else if idx >= total as isize {
        idx = (total as isize) - 1;
    }
    idx as usize
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
