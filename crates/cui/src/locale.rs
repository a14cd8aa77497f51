use menupick_core::{Event, InputError, Phase, PickMode, SessionError};
use menupick_data::normalize_locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLocale {
    KoKr,
    EnUs,
}

impl UiLocale {
    pub fn from_opt(value: Option<&str>) -> Self {
        let normalized = normalize_locale(value);
        if normalized == "en_US" {
            Self::EnUs
        } else {
            Self::KoKr
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::KoKr => "ko_KR",
            Self::EnUs => "en_US",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::KoKr => Self::EnUs,
            Self::EnUs => Self::KoKr,
        }
    }

    pub fn text<'a>(self, en: &'a str, ko: &'a str) -> &'a str {
        if matches!(self, Self::KoKr) {
            ko
        } else {
            en
        }
    }
}

pub fn instruction(locale: UiLocale, max_selection: usize) -> String {
    match locale {
        UiLocale::KoKr => format!("카드를 섞고 {max_selection}개를 뽑아보세요!"),
        UiLocale::EnUs => format!("Shuffle the cards and pick {max_selection}!"),
    }
}

/// Home screen entry for a mode, naming how many cards it lets you turn.
pub fn home_option(locale: UiLocale, mode: PickMode, max_selection: usize) -> String {
    match (locale, mode) {
        (UiLocale::KoKr, PickMode::Default) => format!("랜덤 메뉴 ({max_selection}개 뽑기)"),
        (UiLocale::KoKr, PickMode::Custom) => format!("직접 입력하기 ({max_selection}개 뽑기)"),
        (UiLocale::EnUs, PickMode::Default) => format!("Random menu (pick {max_selection})"),
        (UiLocale::EnUs, PickMode::Custom) => {
            format!("Enter my own menu (pick {max_selection})")
        }
    }
}

/// Label of the shuffle button for the current phase.
pub fn shuffle_label(locale: UiLocale, phase: Phase, max_selection: usize) -> String {
    match phase {
        Phase::Idle => locale.text("Shuffle", "카드 섞기").to_string(),
        Phase::Shuffling => locale.text("Shuffling...", "섞는 중...").to_string(),
        Phase::Shuffled => match locale {
            UiLocale::KoKr => format!("{max_selection}개를 선택하세요!"),
            UiLocale::EnUs => format!("Pick {max_selection}!"),
        },
        Phase::Complete => locale.text("Done!", "완료!").to_string(),
    }
}

pub fn mode_label(locale: UiLocale, mode: PickMode) -> &'static str {
    match mode {
        PickMode::Default => locale.text("Random menu", "랜덤 메뉴"),
        PickMode::Custom => locale.text("Custom menu", "직접 입력"),
    }
}

pub fn session_error_message(locale: UiLocale, err: &SessionError) -> String {
    match (locale, err) {
        (UiLocale::KoKr, SessionError::EmptyItems) => {
            "최소 1개 이상의 메뉴를 입력해주세요!".to_string()
        }
        (UiLocale::KoKr, SessionError::NotShuffled) => "먼저 카드를 섞어주세요!".to_string(),
        (UiLocale::KoKr, SessionError::ShuffleInProgress) => "카드를 섞는 중입니다".to_string(),
        (UiLocale::KoKr, SessionError::UnknownEntry(id)) => format!("없는 카드입니다: {id}"),
        (UiLocale::KoKr, SessionError::UnknownSlot(slot)) => {
            format!("{slot}번 자리는 비어 있습니다")
        }
        (UiLocale::KoKr, SessionError::AlreadySelected(_)) => "이미 뽑은 카드입니다".to_string(),
        (UiLocale::KoKr, SessionError::LimitReached { max }) => {
            format!("이미 {max}개를 다 뽑으셨습니다!")
        }
        (UiLocale::EnUs, SessionError::EmptyItems) => "Enter at least one menu item!".to_string(),
        (UiLocale::EnUs, SessionError::NotShuffled) => "Shuffle the cards first!".to_string(),
        (UiLocale::EnUs, SessionError::LimitReached { max }) => {
            format!("You already picked all {max} cards!")
        }
        (UiLocale::EnUs, other) => other.to_string(),
    }
}

pub fn input_error_message(locale: UiLocale, err: &InputError) -> String {
    let text = match err {
        InputError::Blank => locale.text("Please enter menu items!", "메뉴를 입력해주세요!"),
        InputError::NoItems => locale.text(
            "Enter at least one menu item!",
            "최소 1개 이상의 메뉴를 입력해주세요!",
        ),
        InputError::EmptyPalette => {
            locale.text("Glyph palette is empty", "이모지 목록이 비어 있습니다")
        }
    };
    text.to_string()
}

pub fn format_event(locale: UiLocale, event: &Event) -> String {
    match event {
        Event::DeckBuilt {
            mode,
            entries,
            max_selection,
        } => format!(
            "{} {}: {entries} / {max_selection}",
            mode_label(locale, *mode),
            locale.text("deck", "덱"),
        ),
        Event::ShuffleStarted { steps } => {
            format!("{} ({steps})", locale.text("shuffle started", "섞기 시작"))
        }
        Event::ShuffleStepped { step, steps } => {
            format!("{} {step}/{steps}", locale.text("shuffle", "섞기"))
        }
        Event::ShuffleFinished => locale.text("shuffle finished", "섞기 완료").to_string(),
        Event::EntryRevealed {
            entry,
            name,
            emoji,
            picked,
            max_selection,
            ..
        } => format!(
            "{} {entry}: {name} {emoji} ({picked}/{max_selection})",
            locale.text("revealed", "공개")
        ),
        Event::SelectionComplete { picks } => {
            format!("{}: {}", locale.text("result", "결과"), picks.join(", "))
        }
        Event::SessionReset { entries } => {
            format!("{} ({entries})", locale.text("reset", "초기화"))
        }
    }
}
