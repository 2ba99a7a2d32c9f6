use serde::Serialize;
use std::fmt;

/// Symbolic icon for an entry, chosen from its object classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Icon {
    Person,
    Organization,
    OrganizationalUnit,
    Group,
    Domain,
    Alias,
    /// Carries the lower-cased country code, when the entry has one.
    Country(Option<String>),
    Device,
    Document,
    Host,
    Room,
    Server,
    RootDse,
    Default,
}

/// First matching rule wins.
const RULES: &[(&[&str], Icon)] = &[
    (
        &[
            "person",
            "organizationalperson",
            "inetorgperson",
            "account",
            "posixaccount",
        ],
        Icon::Person,
    ),
    (&["organization"], Icon::Organization),
    (&["organizationalunit"], Icon::OrganizationalUnit),
    (
        &["posixgroup", "groupofnames", "groupofuniquenames", "group"],
        Icon::Group,
    ),
    (
        &["dcobject", "domainrelatedobject", "domain", "builtindomain"],
        Icon::Domain,
    ),
    (&["alias"], Icon::Alias),
    (&["country"], Icon::Country(None)),
    (&["device"], Icon::Device),
    (&["document"], Icon::Document),
    (&["iphost"], Icon::Host),
    (&["room"], Icon::Room),
    (&["server"], Icon::Server),
    (&["openldaprootdse"], Icon::RootDse),
];

impl Icon {
    /// Picks the icon for a set of object classes. `country` is the entry's
    /// `c` value, used only by the country rule.
    pub fn for_object_classes<S: AsRef<str>>(object_classes: &[S], country: Option<&str>) -> Icon {
        let classes: Vec<String> = object_classes
            .iter()
            .map(|c| c.as_ref().to_lowercase())
            .collect();

        let matched = RULES
            .iter()
            .find(|(names, _)| names.iter().any(|n| classes.iter().any(|c| c == n)));

        match matched {
            Some((_, Icon::Country(_))) => Icon::Country(
                country
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_lowercase),
            ),
            Some((_, icon)) => icon.clone(),
            None => Icon::Default,
        }
    }

    /// The token the UI maps to a glyph.
    pub fn token(&self) -> String {
        let fixed = match self {
            Icon::Person => "fas fa-user",
            Icon::Organization => "fas fa-university",
            Icon::OrganizationalUnit => "fas fa-object-group",
            Icon::Group => "fas fa-users",
            Icon::Domain => "fas fa-network-wired",
            Icon::Alias => "fas fa-theater-masks",
            Icon::Country(Some(code)) => return format!("flag {code}"),
            Icon::Country(None) => "flag",
            Icon::Device => "fas fa-mobile-alt",
            Icon::Document => "fas fa-file-alt",
            Icon::Host => "fas fa-wifi",
            Icon::Room => "fas fa-door-open",
            Icon::Server => "fas fa-server",
            Icon::RootDse => "fas fa-info",
            Icon::Default => "fa-fw fas fa-cog",
        };
        fixed.to_string()
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl From<Icon> for String {
    fn from(icon: Icon) -> Self {
        icon.token()
    }
}
