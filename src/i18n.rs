//! Message Catalog
//!
//! Localized UI strings for every visible label and error message.
//! English is the fallback locale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
    Cs,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Ru, Locale::Cs];

    /// Parse a language code, falling back to English for anything unknown.
    ///
    /// Accepts region-qualified tags such as `ru-RU` or `cs_CZ`.
    pub fn parse(code: &str) -> Self {
        let primary = code
            .trim()
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "ru" => Locale::Ru,
            "cs" => Locale::Cs,
            _ => Locale::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
            Locale::Cs => "cs",
        }
    }

    /// Name of the language in that language, for the switcher
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ru => "Русский",
            Locale::Cs => "Čeština",
        }
    }

    /// Look up a message in this locale
    pub fn text(self, message: Message) -> &'static str {
        let [en, ru, cs] = message.translations();
        let text = match self {
            Locale::En => en,
            Locale::Ru => ru,
            Locale::Cs => cs,
        };
        if text.is_empty() {
            en
        } else {
            text
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Every translatable string in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    // Header / landing
    LandingTitle,
    LandingDescription,
    NavAbout,
    NavContact,
    NavRegister,
    NavLogin,
    NavDashboard,
    Logout,

    // Login
    LoginTitle,
    LoginSubmit,
    LoginNoAccount,
    LoginError,

    // Register
    RegisterTitle,
    RegisterSubmit,
    RegisterHaveAccount,
    RegisterError,

    // Shared credential fields
    Username,
    Password,

    // Dashboard
    DashboardCards,
    CreateCard,
    EditCard,
    NoCards,
    ViewCard,
    Edit,
    Delete,
    ConfirmDelete,
    TotalVisits,
    LoadCardsError,
    LoadCardError,
    CreateError,
    EditError,
    DeleteError,
    CardSaved,
    CardDeleted,

    // Card form
    FieldTitle,
    FieldSlug,
    FieldSubtitle,
    FieldDescription,
    FieldEmail,
    FieldPhone,
    FieldAvatar,
    FieldBackgroundImage,
    FieldTemplate,
    FieldFont,
    FieldBackgroundColor,
    FieldTextColor,
    FieldIsActive,
    FieldSocialLinks,
    PlatformPlaceholder,
    UrlPlaceholder,
    AddLink,
    Remove,
    Save,
    Cancel,

    // Validation
    TitleRequired,
    FieldRequired,
    InvalidEmail,
    InvalidColor,
    InvalidLink,
    ReservedSlug,

    // Public card
    PublicEmail,
    PublicPhone,
    PublicSocialLinks,
    PublicLoading,
    PublicError,

    // Landing carousel
    FeatureCreate,
    FeatureStyle,
    FeatureShare,

    // Static pages
    AboutTitle,
    AboutDescription,
    ContactTitle,
    ContactDescription,
}

impl Message {
    /// `[en, ru, cs]`
    fn translations(self) -> [&'static str; 3] {
        use Message::*;
        match self {
            LandingTitle => [
                "Your business card, online in a minute",
                "Ваша визитка онлайн за минуту",
                "Vaše vizitka online za minutu",
            ],
            LandingDescription => [
                "Create a digital business card, style it, and share one link with everyone.",
                "Создайте цифровую визитку, оформите её и делитесь одной ссылкой со всеми.",
                "Vytvořte digitální vizitku, upravte její vzhled a sdílejte jeden odkaz se všemi.",
            ],
            NavAbout => ["About", "О нас", "O nás"],
            NavContact => ["Contact", "Контакты", "Kontakt"],
            NavRegister => ["Register", "Регистрация", "Registrace"],
            NavLogin => ["Log in", "Войти", "Přihlásit se"],
            NavDashboard => ["My cards", "Мои визитки", "Moje vizitky"],
            Logout => ["Log out", "Выйти", "Odhlásit se"],

            LoginTitle => ["Log in", "Вход", "Přihlášení"],
            LoginSubmit => ["Log in", "Войти", "Přihlásit se"],
            LoginNoAccount => [
                "Don't have an account?",
                "Нет аккаунта?",
                "Nemáte účet?",
            ],
            LoginError => [
                "Invalid username or password",
                "Неверное имя пользователя или пароль",
                "Neplatné uživatelské jméno nebo heslo",
            ],

            RegisterTitle => ["Create an account", "Регистрация", "Vytvořit účet"],
            RegisterSubmit => ["Register", "Зарегистрироваться", "Zaregistrovat se"],
            RegisterHaveAccount => [
                "Already have an account?",
                "Уже есть аккаунт?",
                "Už máte účet?",
            ],
            RegisterError => [
                "Registration failed",
                "Ошибка регистрации",
                "Registrace se nezdařila",
            ],

            Username => ["Username", "Имя пользователя", "Uživatelské jméno"],
            Password => ["Password", "Пароль", "Heslo"],

            DashboardCards => ["My cards", "Мои визитки", "Moje vizitky"],
            CreateCard => ["Create card", "Создать визитку", "Vytvořit vizitku"],
            EditCard => ["Edit card", "Редактировать визитку", "Upravit vizitku"],
            NoCards => [
                "You have no cards yet",
                "У вас пока нет визиток",
                "Zatím nemáte žádné vizitky",
            ],
            ViewCard => ["View card", "Открыть визитку", "Zobrazit vizitku"],
            Edit => ["Edit", "Изменить", "Upravit"],
            Delete => ["Delete", "Удалить", "Smazat"],
            ConfirmDelete => [
                "Delete this card?",
                "Удалить эту визитку?",
                "Smazat tuto vizitku?",
            ],
            TotalVisits => ["Total visits", "Всего просмотров", "Celkem návštěv"],
            LoadCardsError => [
                "Could not load your cards",
                "Не удалось загрузить визитки",
                "Vizitky se nepodařilo načíst",
            ],
            LoadCardError => [
                "Could not load the card",
                "Не удалось загрузить визитку",
                "Vizitku se nepodařilo načíst",
            ],
            CreateError => [
                "Could not create the card",
                "Не удалось создать визитку",
                "Vizitku se nepodařilo vytvořit",
            ],
            EditError => [
                "Could not save the card",
                "Не удалось сохранить визитку",
                "Vizitku se nepodařilo uložit",
            ],
            DeleteError => [
                "Could not delete the card",
                "Не удалось удалить визитку",
                "Vizitku se nepodařilo smazat",
            ],
            CardSaved => ["Card saved", "Визитка сохранена", "Vizitka uložena"],
            CardDeleted => ["Card deleted", "Визитка удалена", "Vizitka smazána"],

            FieldTitle => ["Title", "Заголовок", "Název"],
            FieldSlug => ["Link name", "Имя ссылки", "Název odkazu"],
            FieldSubtitle => ["Subtitle", "Подзаголовок", "Podtitul"],
            FieldDescription => ["Description", "Описание", "Popis"],
            FieldEmail => ["Email", "Эл. почта", "E-mail"],
            FieldPhone => ["Phone", "Телефон", "Telefon"],
            FieldAvatar => ["Avatar", "Аватар", "Avatar"],
            FieldBackgroundImage => ["Background image", "Фоновое изображение", "Obrázek pozadí"],
            FieldTemplate => ["Template", "Шаблон", "Šablona"],
            FieldFont => ["Font", "Шрифт", "Písmo"],
            FieldBackgroundColor => ["Background color", "Цвет фона", "Barva pozadí"],
            FieldTextColor => ["Text color", "Цвет текста", "Barva textu"],
            FieldIsActive => ["Published", "Опубликована", "Zveřejněno"],
            FieldSocialLinks => ["Social links", "Социальные сети", "Sociální sítě"],
            PlatformPlaceholder => [
                "Platform (e.g., Twitter)",
                "Платформа (например, Telegram)",
                "Platforma (např. Twitter)",
            ],
            UrlPlaceholder => ["URL", "Ссылка", "Odkaz"],
            AddLink => ["Add link", "Добавить ссылку", "Přidat odkaz"],
            Remove => ["Remove", "Удалить", "Odebrat"],
            Save => ["Save", "Сохранить", "Uložit"],
            Cancel => ["Cancel", "Отмена", "Zrušit"],

            TitleRequired => [
                "Title is required",
                "Заголовок обязателен",
                "Název je povinný",
            ],
            FieldRequired => [
                "Please fill in all required fields",
                "Заполните все обязательные поля",
                "Vyplňte všechna povinná pole",
            ],
            InvalidEmail => [
                "Enter a valid email address",
                "Введите корректный адрес эл. почты",
                "Zadejte platnou e-mailovou adresu",
            ],
            InvalidColor => [
                "Colors must look like #RRGGBB",
                "Цвет должен быть в формате #RRGGBB",
                "Barva musí mít tvar #RRGGBB",
            ],
            InvalidLink => [
                "Links must start with http://, https://, mailto: or tel:",
                "Ссылка должна начинаться с http://, https://, mailto: или tel:",
                "Odkaz musí začínat http://, https://, mailto: nebo tel:",
            ],
            ReservedSlug => [
                "This address is already used by a site page",
                "Этот адрес занят страницей сайта",
                "Tuto adresu už používá stránka webu",
            ],

            PublicEmail => ["Email:", "Эл. почта:", "E-mail:"],
            PublicPhone => ["Phone:", "Телефон:", "Telefon:"],
            PublicSocialLinks => ["Social links", "Социальные сети", "Sociální sítě"],
            PublicLoading => ["Loading...", "Загрузка...", "Načítání..."],
            PublicError => [
                "Card not found",
                "Визитка не найдена",
                "Vizitka nebyla nalezena",
            ],

            FeatureCreate => [
                "Fill in your details and get a card in a minute",
                "Заполните данные и получите визитку за минуту",
                "Vyplňte údaje a za minutu máte vizitku",
            ],
            FeatureStyle => [
                "Pick a template, font and colors to match your style",
                "Выберите шаблон, шрифт и цвета под свой стиль",
                "Vyberte šablonu, písmo a barvy podle svého stylu",
            ],
            FeatureShare => [
                "Share one link with all your contacts and socials",
                "Делитесь одной ссылкой со всеми контактами и соцсетями",
                "Sdílejte jeden odkaz se všemi kontakty a sítěmi",
            ],

            AboutTitle => ["About us", "О нас", "O nás"],
            AboutDescription => [
                "QuickCard turns your contact details into a shareable page.",
                "QuickCard превращает ваши контакты в страницу, которой легко поделиться.",
                "QuickCard promění vaše kontaktní údaje ve stránku, kterou snadno sdílíte.",
            ],
            ContactTitle => ["Contact", "Контакты", "Kontakt"],
            ContactDescription => [
                "Questions or feedback? Write to us at hello@quickcard.app.",
                "Вопросы или предложения? Пишите на hello@quickcard.app.",
                "Dotazy nebo připomínky? Napište nám na hello@quickcard.app.",
            ],
        }
    }

    #[cfg(test)]
    const ALL: [Message; 72] = {
        use Message::*;
        [
            LandingTitle, LandingDescription, NavAbout, NavContact, NavRegister, NavLogin,
            NavDashboard, Logout, LoginTitle, LoginSubmit, LoginNoAccount, LoginError,
            RegisterTitle, RegisterSubmit, RegisterHaveAccount, RegisterError, Username,
            Password, DashboardCards, CreateCard, EditCard, NoCards, ViewCard, Edit, Delete,
            ConfirmDelete, TotalVisits, LoadCardsError, LoadCardError, CreateError, EditError,
            DeleteError, CardSaved, CardDeleted, FieldTitle, FieldSlug, FieldSubtitle,
            FieldDescription, FieldEmail, FieldPhone, FieldAvatar, FieldBackgroundImage,
            FieldTemplate, FieldFont, FieldBackgroundColor, FieldTextColor, FieldIsActive, FieldSocialLinks,
            PlatformPlaceholder, UrlPlaceholder, AddLink, Remove, Save, Cancel, TitleRequired,
            FieldRequired, InvalidEmail, InvalidColor, InvalidLink, ReservedSlug, PublicEmail,
            PublicPhone, PublicSocialLinks, PublicLoading, PublicError, FeatureCreate,
            FeatureStyle, FeatureShare, AboutTitle, AboutDescription,
            ContactTitle, ContactDescription,
        ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!(Locale::parse("ru"), Locale::Ru);
        assert_eq!(Locale::parse("cs-CZ"), Locale::Cs);
        assert_eq!(Locale::parse("RU_ru"), Locale::Ru);
        assert_eq!(Locale::parse("de"), Locale::En);
        assert_eq!(Locale::parse(""), Locale::En);
    }

    #[test]
    fn test_every_message_translated() {
        // Raw table entries; `text` would hide gaps behind the English fallback
        for message in Message::ALL {
            for (locale, text) in Locale::ALL.into_iter().zip(message.translations()) {
                assert!(!text.trim().is_empty(), "{:?} missing in {}", message, locale);
            }
        }
    }

    #[test]
    fn test_translations_differ_from_english() {
        for message in Message::ALL {
            let [en, ru, _] = message.translations();
            assert_ne!(en, ru, "{:?} left untranslated in ru", message);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Locale::En.text(Message::Save), "Save");
        assert_eq!(Locale::Ru.text(Message::Save), "Сохранить");
        assert_eq!(Locale::Cs.text(Message::Save), "Uložit");
    }
}
