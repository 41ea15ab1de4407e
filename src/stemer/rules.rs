//! Lovins rule tables: endings with their stem conditions, and the
//! respelling rules applied after an ending is removed.

/// Every condition also requires a stem of at least this many chars.
pub const MIN_STEM_LEN: usize = 2;

/// Condition on the stem left after removing an ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    AA,
    BB,
    CC,
}

pub(crate) fn ends_with_str(word: &[char], suffix: &str) -> bool {
    let n = suffix.chars().count();
    word.len() >= n && word[word.len() - n..].iter().copied().eq(suffix.chars())
}

fn ends_with_any(word: &[char], suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| ends_with_str(word, s))
}

/// `u`, any letter, `e`.
fn ends_with_u_any_e(word: &[char]) -> bool {
    let n = word.len();
    n >= 3 && word[n - 1] == 'e' && word[n - 3] == 'u'
}

impl Condition {
    pub fn holds(self, stem: &[char]) -> bool {
        use Condition::*;

        let len = stem.len();
        if len < MIN_STEM_LEN {
            return false;
        }
        match self {
            A => true,
            B => len >= 3,
            C => len >= 4,
            D => len >= 5,
            E => !ends_with_str(stem, "e"),
            F => len >= 3 && !ends_with_str(stem, "e"),
            G => len >= 3 && ends_with_str(stem, "f"),
            H => ends_with_any(stem, &["t", "ll"]),
            I => !ends_with_any(stem, &["o", "e"]),
            J => !ends_with_any(stem, &["a", "e"]),
            K => len >= 3 && (ends_with_any(stem, &["l", "i"]) || ends_with_u_any_e(stem)),
            L => {
                !ends_with_any(stem, &["u", "x"])
                    && (!ends_with_str(stem, "s") || ends_with_str(stem, "os"))
            }
            M => !ends_with_any(stem, &["a", "c", "e", "m"]),
            N => {
                if ends_with_str(stem, "s") {
                    len >= 4
                } else {
                    len >= 3
                }
            }
            O => ends_with_any(stem, &["l", "i"]),
            P => !ends_with_str(stem, "c"),
            Q => len >= 3 && !ends_with_any(stem, &["l", "n"]),
            R => ends_with_any(stem, &["n", "r"]),
            S => {
                ends_with_str(stem, "dr")
                    || (ends_with_str(stem, "t") && !ends_with_str(stem, "tt"))
            }
            T => {
                ends_with_str(stem, "s")
                    || (ends_with_str(stem, "t") && !ends_with_str(stem, "ot"))
            }
            U => ends_with_any(stem, &["l", "m", "n", "r"]),
            V => ends_with_str(stem, "c"),
            W => !ends_with_any(stem, &["s", "u"]),
            X => ends_with_any(stem, &["l", "i"]) || ends_with_u_any_e(stem),
            Y => ends_with_str(stem, "in"),
            Z => !ends_with_str(stem, "f"),
            AA => ends_with_any(stem, &["d", "f", "ph", "th", "l", "er", "or", "es", "t"]),
            BB => len >= 3 && !ends_with_any(stem, &["met", "ryst"]),
            CC => ends_with_str(stem, "l"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ending {
    pub suffix: &'static str,
    pub condition: Condition,
}

const fn e(suffix: &'static str, condition: Condition) -> Ending {
    Ending { suffix, condition }
}

/// Endings, longest first.
#[rustfmt::skip]
pub const ENDINGS: &[Ending] = {
    use Condition::*;
    &[
        e("alistically", B), e("arizability", A), e("izationally", B),
        e("antialness", A), e("arisations", A), e("arizations", A), e("entialness", A),
        e("allically", C), e("antaneous", A), e("antiality", A), e("arisation", A),
        e("arization", A), e("ationally", B), e("ativeness", A), e("eableness", E),
        e("entations", A), e("entiality", A), e("entialize", A), e("entiation", A),
        e("ionalness", A), e("istically", A), e("itousness", A), e("izability", A),
        e("izational", A),
        e("ableness", A), e("arizable", A), e("entation", A), e("entially", A),
        e("eousness", A), e("ibleness", A), e("icalness", A), e("ionalism", A),
        e("ionality", A), e("ionalize", A), e("iousness", A), e("izations", A),
        e("lessness", A),
        e("ability", A), e("aically", A), e("alistic", B), e("alities", A),
        e("ariness", E), e("aristic", A), e("arizing", A), e("ateness", A),
        e("atingly", A), e("ational", B), e("atively", A), e("ativism", A),
        e("elihood", E), e("encible", A), e("entally", A), e("entials", A),
        e("entiate", A), e("entness", A), e("fulness", A), e("ibility", A),
        e("icalism", A), e("icalist", A), e("icality", A), e("icalize", A),
        e("ication", G), e("icianry", A), e("ination", A), e("ingness", A),
        e("ionally", A), e("isation", A), e("ishness", A), e("istical", A),
        e("iteness", A), e("iveness", A), e("ivistic", A), e("ivities", A),
        e("ization", F), e("izement", A), e("oidally", A), e("ousness", A),
        e("aceous", A), e("acious", B), e("action", G), e("alness", A),
        e("ancial", A), e("ancies", A), e("ancing", B), e("ariser", A),
        e("arized", A), e("arizer", A), e("atable", A), e("ations", B),
        e("atives", A), e("eature", Z), e("efully", A), e("encies", A),
        e("encing", A), e("ential", A), e("enting", C), e("entist", A),
        e("eously", A), e("ialist", A), e("iality", A), e("ialize", A),
        e("ically", A), e("icance", A), e("icians", A), e("icists", A),
        e("ifully", A), e("ionals", A), e("ionate", D), e("ioning", A),
        e("ionist", A), e("iously", A), e("istics", A), e("izable", E),
        e("lessly", A), e("nesses", A), e("oidism", A),
        e("acies", A), e("acity", A), e("aging", B), e("aical", A),
        e("alist", A), e("alism", B), e("ality", A), e("alize", A),
        e("allic", BB), e("anced", B), e("ances", B), e("antic", C),
        e("arial", A), e("aries", A), e("arily", A), e("arity", B),
        e("arize", A), e("aroid", A), e("ately", A), e("ating", I),
        e("ation", B), e("ative", A), e("ators", A), e("atory", A),
        e("ature", E), e("early", Y), e("ehood", A), e("eless", A),
        e("elity", A), e("ement", A), e("enced", A), e("ences", A),
        e("eness", E), e("ening", E), e("ental", A), e("ented", C),
        e("ently", A), e("fully", A), e("ially", A), e("icant", A),
        e("ician", A), e("icide", A), e("icism", A), e("icist", A),
        e("icity", A), e("idine", I), e("iedly", A), e("ihood", A),
        e("inate", A), e("iness", A), e("ingly", B), e("inism", J),
        e("inity", CC), e("ional", A), e("ioned", A), e("ished", A),
        e("istic", A), e("ities", A), e("itous", A), e("ively", A),
        e("ivity", A), e("izers", F), e("izing", F), e("oidal", A),
        e("oides", A), e("otide", A), e("ously", A),
        e("able", A), e("ably", A), e("ages", B), e("ally", B),
        e("ance", B), e("ancy", B), e("ants", B), e("aric", A),
        e("arly", K), e("ated", I), e("ates", A), e("atic", B),
        e("ator", A), e("ealy", Y), e("edly", E), e("eful", A),
        e("eity", A), e("ence", A), e("ency", A), e("ened", E),
        e("enly", E), e("eous", A), e("hood", A), e("ials", A),
        e("ians", A), e("ible", A), e("ibly", A), e("ical", A),
        e("ides", L), e("iers", A), e("iful", A), e("ines", M),
        e("ings", N), e("ions", B), e("ious", A), e("isms", B),
        e("ists", A), e("itic", H), e("ized", F), e("izer", F),
        e("less", A), e("lily", A), e("ness", A), e("ogen", A),
        e("ward", A), e("wise", A), e("ying", B), e("yish", A),
        e("acy", A), e("age", B), e("aic", A), e("als", BB),
        e("ant", B), e("ars", O), e("ary", F), e("ata", A),
        e("ate", A), e("eal", Y), e("ear", Y), e("ely", E),
        e("ene", E), e("ent", C), e("ery", E), e("ese", A),
        e("ful", A), e("ial", A), e("ian", A), e("ics", A),
        e("ide", L), e("ied", A), e("ier", A), e("ies", P),
        e("ily", A), e("ine", M), e("ing", N), e("ion", Q),
        e("ish", C), e("ism", B), e("ist", A), e("ite", AA),
        e("ity", A), e("ium", A), e("ive", A), e("ize", F),
        e("oid", A), e("one", R), e("ous", A),
        e("ae", A), e("al", BB), e("ar", X), e("as", B),
        e("ed", E), e("en", F), e("es", E), e("ia", A),
        e("ic", A), e("is", A), e("ly", B), e("on", S),
        e("or", T), e("um", U), e("us", V), e("yl", R),
        e("'s", A), e("s'", A),
        e("a", A), e("e", A), e("i", A), e("o", A),
        e("s", W), e("y", B),
    ]
};

/// Final consonants collapsed when doubled.
pub const UNDOUBLE: &[char] = &['b', 'd', 'g', 'l', 'm', 'n', 'p', 'r', 's', 't'];

#[derive(Debug, Clone, Copy)]
pub struct Respelling {
    pub suffix: &'static str,
    pub replacement: &'static str,
    /// The rule is skipped when the char before `suffix` is one of these.
    pub not_after: &'static [char],
}

const fn r(suffix: &'static str, replacement: &'static str) -> Respelling {
    Respelling {
        suffix,
        replacement,
        not_after: &[],
    }
}

const fn r_unless(
    suffix: &'static str,
    replacement: &'static str,
    not_after: &'static [char],
) -> Respelling {
    Respelling {
        suffix,
        replacement,
        not_after,
    }
}

pub const RESPELLINGS: &[Respelling] = &[
    r("iev", "ief"),
    r("uct", "uc"),
    r("umpt", "um"),
    r("rpt", "rb"),
    r("urs", "ur"),
    r("istr", "ister"),
    r("metr", "meter"),
    r("olv", "olut"),
    r_unless("ul", "l", &['a', 'i', 'o']),
    r("bex", "bic"),
    r("dex", "dic"),
    r("pex", "pic"),
    r("tex", "tic"),
    r("ax", "ac"),
    r("ex", "ec"),
    r("ix", "ic"),
    r("lux", "luc"),
    r("uad", "uas"),
    r("vad", "vas"),
    r("cid", "cis"),
    r("lid", "lis"),
    r("erid", "eris"),
    r("pand", "pans"),
    r_unless("end", "ens", &['s']),
    r("ond", "ons"),
    r("lud", "lus"),
    r("rud", "rus"),
    r_unless("her", "hes", &['p', 't']),
    r("mit", "mis"),
    r_unless("ent", "ens", &['m']),
    r("ert", "ers"),
    r_unless("et", "es", &['n']),
    r("yt", "ys"),
    r("yz", "ys"),
];

impl Respelling {
    pub fn matches(&self, word: &[char]) -> bool {
        if !ends_with_str(word, self.suffix) {
            return false;
        }
        let at = word.len() - self.suffix.chars().count();
        at == 0 || !self.not_after.contains(&word[at - 1])
    }
}
