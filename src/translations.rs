//! Fixed interface strings in each locale.
//!
//! Authored content comes from the JSON collections; everything else the
//! pages print (navigation labels, section headings, button captions) lives
//! here.

use crate::config::FinanceField;
use crate::locale::Locale;

#[derive(Debug)]
pub struct Strings {
    pub nav: NavStrings,
    pub home: HomeStrings,
    pub works: ListStrings,
    pub advertisements: ListStrings,
    pub donate: DonateStrings,
    pub footer: FooterStrings,
    pub finance: FinanceStrings,
    /// Caption of the overlay close control.
    pub close: &'static str,
    /// Label for the image counter in list cards (`3 photos`).
    pub photos: &'static str,
}

#[derive(Debug)]
pub struct NavStrings {
    pub home: &'static str,
    pub about: &'static str,
    pub works: &'static str,
    pub advertisements: &'static str,
    pub legal: &'static str,
    pub donate: &'static str,
}

#[derive(Debug)]
pub struct HomeStrings {
    pub donate: &'static str,
    pub latest_works: &'static str,
    pub latest_announcements: &'static str,
    pub advertisements: &'static str,
    pub view_all: &'static str,
}

#[derive(Debug)]
pub struct ListStrings {
    pub title: &'static str,
    pub subtitle: &'static str,
}

#[derive(Debug)]
pub struct DonateStrings {
    pub title: &'static str,
    pub description: &'static str,
    pub call: &'static str,
    pub promise: &'static str,
    pub button: &'static str,
    pub bank_details: &'static str,
}

#[derive(Debug)]
pub struct FooterStrings {
    pub quick_links: &'static str,
    pub contact: &'static str,
    pub rights: &'static str,
}

/// Labels for the configured financial identifiers.
#[derive(Debug)]
pub struct FinanceStrings {
    pub title: &'static str,
    pub licence: &'static str,
    pub iban: &'static str,
    pub bankily: &'static str,
    pub masrvi: &'static str,
    pub sedad: &'static str,
}

impl FinanceStrings {
    pub fn label(&self, field: FinanceField) -> &'static str {
        match field {
            FinanceField::Licence => self.licence,
            FinanceField::Iban => self.iban,
            FinanceField::Bankily => self.bankily,
            FinanceField::Masrvi => self.masrvi,
            FinanceField::Sedad => self.sedad,
        }
    }
}

static AR: Strings = Strings {
    nav: NavStrings {
        home: "الرئيسية",
        about: "عن الجمعية",
        works: "الأعمال",
        advertisements: "الإعلانات",
        legal: "النظام الداخلي",
        donate: "تبرع الآن",
    },
    home: HomeStrings {
        donate: "تبرع الآن",
        latest_works: "أحدث الأعمال",
        latest_announcements: "آخر الأخبار",
        advertisements: "الإعلانات",
        view_all: "عرض الكل",
    },
    works: ListStrings {
        title: "أعمالنا",
        subtitle: "مشاريعنا وأنشطتنا الخيرية",
    },
    advertisements: ListStrings {
        title: "الإعلانات",
        subtitle: "آخر إعلاناتنا وحملاتنا الخيرية",
    },
    donate: DonateStrings {
        title: "ساهم معنا في الخير",
        description: "للتبرع، يرجى التواصل معنا عبر واتساب",
        call: "تبرع الآن وكن سبباً في الخير",
        promise: "صدقتك تصل إلى مستحقيها بأمانة وشفافية كاملة",
        button: "تواصل عبر واتساب",
        bank_details: "التفاصيل المصرفية",
    },
    footer: FooterStrings {
        quick_links: "روابط سريعة",
        contact: "تواصل معنا",
        rights: "جميع الحقوق محفوظة",
    },
    finance: FinanceStrings {
        title: "المعلومات المالية",
        licence: "الترخيص",
        iban: "رقم الحساب البنكي الدولي",
        bankily: "بنكيلي",
        masrvi: "مصرفي",
        sedad: "السداد",
    },
    close: "إغلاق",
    photos: "صور",
};

static FR: Strings = Strings {
    nav: NavStrings {
        home: "Accueil",
        about: "À propos",
        works: "Nos activités",
        advertisements: "Annonces",
        legal: "Règlement",
        donate: "Faire un don",
    },
    home: HomeStrings {
        donate: "Faire un don",
        latest_works: "Dernières activités",
        latest_announcements: "Dernières nouvelles",
        advertisements: "Annonces",
        view_all: "Voir tout",
    },
    works: ListStrings {
        title: "Nos activités",
        subtitle: "Nos projets et actions caritatives",
    },
    advertisements: ListStrings {
        title: "Annonces",
        subtitle: "Nos dernières annonces et campagnes caritatives",
    },
    donate: DonateStrings {
        title: "Contribuez avec nous au bien",
        description: "Pour faire un don, veuillez nous contacter via WhatsApp",
        call: "Faites un don maintenant et soyez une cause de bien",
        promise: "Votre don parvient à ses bénéficiaires avec intégrité et transparence totale",
        button: "Contacter via WhatsApp",
        bank_details: "Coordonnées bancaires",
    },
    footer: FooterStrings {
        quick_links: "Liens rapides",
        contact: "Contact",
        rights: "Tous droits réservés",
    },
    finance: FinanceStrings {
        title: "Informations financières",
        licence: "Licence",
        iban: "IBAN",
        bankily: "Bankily",
        masrvi: "Masrvi",
        sedad: "Sedad",
    },
    close: "Fermer",
    photos: "photos",
};

pub fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::Ar => &AR,
        Locale::Fr => &FR,
    }
}
