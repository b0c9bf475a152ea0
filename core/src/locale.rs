use crate::error::ValidationError;

/// Language of every user-facing string.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Locale {
    #[default]
    #[strum(to_string = "ar", serialize = "arabic")]
    Arabic,
    #[strum(to_string = "en", serialize = "english")]
    English,
}

impl Locale {
    pub fn catalog(self) -> &'static Catalog {
        match self {
            Locale::Arabic => &ARABIC,
            Locale::English => &ENGLISH,
        }
    }

    /// Text direction attribute for rendered fragments.
    pub fn dir(self) -> &'static str {
        match self {
            Locale::Arabic => "rtl",
            Locale::English => "ltr",
        }
    }
}

/// User-facing strings for one locale.
#[derive(Debug)]
pub struct Catalog {
    pub empty_input: &'static str,
    pub too_short: &'static str,
    pub connectivity: &'static str,
    pub health_warning: &'static str,
    pub health_unreachable: &'static str,
    pub no_poems: &'static str,
    pub emotions_heading: &'static str,
    pub emotion_caption: &'static str,
    pub confidence_label: &'static str,
    pub all_emotions_heading: &'static str,
    pub poetry_heading: &'static str,
    emotion_labels: &'static [(&'static str, &'static str)],
}

impl Catalog {
    /// Localized name of an emotion key. Keys outside the table are returned
    /// unchanged so new backend categories still show up.
    pub fn emotion_label<'a>(&self, key: &'a str) -> &'a str {
        self.emotion_labels
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, label)| *label)
            .unwrap_or(key)
    }

    pub fn validation_message(&self, err: ValidationError) -> &'static str {
        match err {
            ValidationError::Empty => self.empty_input,
            ValidationError::TooShort => self.too_short,
        }
    }
}

pub static ARABIC: Catalog = Catalog {
    empty_input: "الرجاء إدخال نص للتحليل",
    too_short: "النص قصير جداً",
    connectivity: "حدث خطأ: تأكد من تشغيل الخادم",
    health_warning: "تحذير: الخادم قد لا يكون متاحاً",
    health_unreachable: "تعذر الاتصال بالخادم",
    no_poems: "لا توجد أشعار متاحة",
    emotions_heading: "المشاعر المكتشفة",
    emotion_caption: "المشاعر:",
    confidence_label: "نسبة الثقة:",
    all_emotions_heading: "جميع المشاعر:",
    poetry_heading: "القصيدة المناسبة لك",
    emotion_labels: &[("joy", "فرح"), ("love", "حب"), ("sad", "حزن")],
};

pub static ENGLISH: Catalog = Catalog {
    empty_input: "Please enter some text to analyze",
    too_short: "The text is too short",
    connectivity: "Something went wrong: make sure the server is running",
    health_warning: "Warning: the server may be unavailable",
    health_unreachable: "Could not reach the server",
    no_poems: "No poems available",
    emotions_heading: "Detected emotion",
    emotion_caption: "Emotion:",
    confidence_label: "Confidence:",
    all_emotions_heading: "All emotions:",
    poetry_heading: "A poem for you",
    emotion_labels: &[("joy", "Joy"), ("love", "Love"), ("sad", "Sadness")],
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_known_emotions_are_localized() {
        let ar = Locale::Arabic.catalog();
        assert_eq!(ar.emotion_label("joy"), "فرح");
        assert_eq!(ar.emotion_label("love"), "حب");
        assert_eq!(ar.emotion_label("sad"), "حزن");
    }

    #[test]
    fn test_unknown_emotion_passes_through() {
        for locale in Locale::iter() {
            assert_eq!(locale.catalog().emotion_label("anger"), "anger");
        }
    }

    #[test]
    fn test_locale_parses_short_and_long_names() {
        assert_eq!("ar".parse::<Locale>().unwrap(), Locale::Arabic);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!("english".parse::<Locale>().unwrap(), Locale::English);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_validation_messages() {
        let ar = Locale::Arabic.catalog();
        assert_eq!(ar.validation_message(ValidationError::Empty), "الرجاء إدخال نص للتحليل");
        assert_eq!(ar.validation_message(ValidationError::TooShort), "النص قصير جداً");
    }
}
