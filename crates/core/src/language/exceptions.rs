//! Word-level pronunciation overrides.
//!
//! Two tables: unstressed entries replace the rule-based phones but are
//! still syllabified and stressed; stressed entries are returned verbatim.
//! Entries are written one per line as `word: ph1 ph2 ...`.

use std::collections::HashMap;
use std::path::Path;

use crate::error::LexiconError;
use crate::types::Phone;

use super::graphemes::normalise;

const UNSTRESSED_DATA: &str = "
moyn: m OE n
dy: d @
fy: f @
y: @
ych: @ ch
ym: @ m
yn: @ n
yr: @ r
celsius: c E l s I W s
gelsius: g E l s I W s
chelsius: ch E l s I W s
nghelsius: ngh E l s I W s
trapesiymau: t r A p E s I @ m AU
drapesiymau: d r A p E s I @ m AU
thrapesiymau: th r A p E s I @ m AU
nhrapesiymau: nh r A p E s I @ m AU
acasiâu: A c A s I Â U
hacasiâu: h A c A s I Â U
ffantasiâu: ff A n t A s I Â U
siwmper: sh W m p E r
siwmperi: sh W m p E r I
siwed: s IW E d
siw: s IW
siwio: s IW I O
siwper: s IW p E r
gwysiwr: g w Y s I W r
wysiwr: w Y s I W r
bwa: b W A
fwa: f W A
mwa: m W A
dwi: d W I
wnion: W n I O n
hwnion: h W n I O n
wnionyn: W n I O n Y n
hwnionyn: h W n I O n Y n
wnionod: W n I O n O d
hwnionod: h W n I O n O d
chwlomb: ch W l O m b
chwlombau: ch W l O m b AU
cwlomb: c W l O m b
cwlombau: c W l O m b AU
gwlomb: g W l O m b
gwlombau: g W l O m b AU
nghwlomb: ngh W l O m b
nghwlombau: ngh W l O m b AU
gwlwm: g W l W m
wlna: W l n A
hwlna: h W l n A
diwlychol: d I wl @ ch O l
ewlychol: E wl @ ch O l
hewlychol: h E wl @ ch O l
ewlychu: E wl @ ch U
hewlychu: h E wl @ ch U
diwnïad: d I wn Ï A d
ddiwnïad: dd I wn Ï A d
diwraidd: d I wr AI dd
ddiwraidd: dd I wr AI dd
diwreiddio: d I wr EI dd I O
ddiwreiddio: dd I wr EI dd I O
diwres: d I wr E s
ddiwres: dd I wr E s
dwywreiciaeth: d WY wr EI c I AE th
ddwywreiciaeth: dd WY wr EI c I AE th
dwywreigiaeth: d WY wr EI g I AE th
ddwywreigiaeth: dd WY wr EI g I AE th
dwywreigiol: d WY wr EI g I O l
ddwywreigiol: dd WY wr EI g I O l
llandegwning: ll A n d E g W n I ng
landegwning: l A n d E g W n I ng
emwladu: E m W l A d U
hemwladu: h E m W l A d U
dramaeiddio: d r A m A EI dd I O
eirawen: EI r A w E n
ffawydd: ff A WY dd
ffawydden: ff A WY dd E n
bioymoleuedd: b I O @ m O l EU E dd
fioymoleuedd: f I O @ m O l EU E dd
mioymoleuedd: m I O @ m O l EU E dd
gelliwastad: g E ll I w A s t A d
ngelliwastad: ng E ll I w A s t A d
microeiliad: m I c r O EI l I A d
ficroeiliad: f I c r O EI l I A d
microeiliadau: m I c r O EI l I A d AU
ficroeiliadau: f I c r O EI l I A d AU
seroeiddio: s E r O EI dd I O
gloeuni: g l O EU n I
cilowat: c I l O w A t
gilowat: g I l O w A t
chilowat: ch I l O w A t
nghilowat: ngh I l O w A t
niwrowyddorau: n IW r O w Y dd O r AU
ffocsls: ff O c s @ l s
hyrdls: h @ r d @ l s
fangls: f A n g @ l s
jyngls: j @ n g @ l s
mangls: m A n g @ l s
metr: m E t @ r
fetr: f E t @ r
cilometr: c I l O m E t @ r
chilometr: ch I l O m E t @ r
nghilometr: ngh I l O m E t @ r
gilometr: g I l O m E t @ r
litr: l I t @ r
theatr: th E A t @ r
ochr: O ch @ r
";

const STRESSED_DATA: &str = "
a: A
ag: A g
â: A
ei: EI
i: I
o: O
dy: d @
fy: f @
mi: m I
y: @
ych: @ ch
yng: @ ng
yn: @ n
ym: @ m
yr: @ r
cilometr: c I l O1 m E t @ r
chilometr: ch I l O1 m E t @ r
gilometr: g I l O1 m E t @ r
hwyr: h WY1 r
llwyr: ll WY1 r
lwyr: l WY1 r
metr: m E1 t @ r
fetr: f E1 t @ r
litr: l I1 t @ r
ochr: O1 ch @ r
theatr: th E1 A t @ r
trwy: t r WY1
thrwy: th r WY1
drwy: d r WY1
trwy'r: t r WY1 r
thrwy'r: th r WY1 r
drwy'r: d r WY1 r
dirprwy: d I1 r p r WY
ddirprwy: dd I1 r p r WY
dirprwy'r: d I1 r p r WY r
ddirprwy'r: dd I1 r p r WY r
dsilis: j I1 l I s
ïodin: I1 O d I n
";

/// Parse `word: ph1 ph2 ...` lines. Blank lines and `#` comments are skipped.
pub fn parse_entries(text: &str) -> Result<Vec<(String, Vec<Phone>)>, LexiconError> {
    let mut entries = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (word, phones) = line.split_once(':').ok_or_else(|| LexiconError::Parse {
            line: n + 1,
            message: format!("expected 'word: phones', got {:?}", line),
        })?;
        let word = normalise(word.trim());
        let phones: Vec<Phone> = phones.split_whitespace().map(String::from).collect();
        if word.is_empty() || phones.is_empty() {
            return Err(LexiconError::Parse {
                line: n + 1,
                message: format!("empty word or phones in {:?}", line),
            });
        }
        entries.push((word, phones));
    }
    Ok(entries)
}

fn builtin_table(name: &str, text: &str) -> HashMap<String, Vec<Phone>> {
    match parse_entries(text) {
        Ok(entries) => entries.into_iter().collect(),
        Err(e) => {
            log::error!("Built-in {} exception table is malformed: {}", name, e);
            HashMap::new()
        }
    }
}

lazy_static::lazy_static! {
    static ref BUILTIN: Exceptions = Exceptions {
        unstressed: builtin_table("unstressed", UNSTRESSED_DATA),
        stressed: builtin_table("stressed", STRESSED_DATA),
    };
}

/// The two exception tables.
#[derive(Debug, Clone, Default)]
pub struct Exceptions {
    unstressed: HashMap<String, Vec<Phone>>,
    stressed: HashMap<String, Vec<Phone>>,
}

impl Exceptions {
    /// The built-in tables, parsed once per process.
    pub fn builtin() -> &'static Exceptions {
        &BUILTIN
    }

    /// Add unstressed entries parsed from `text`, replacing existing words.
    pub fn with_unstressed(mut self, text: &str) -> Result<Self, LexiconError> {
        self.unstressed.extend(parse_entries(text)?);
        Ok(self)
    }

    /// Add stressed entries parsed from `text`, replacing existing words.
    pub fn with_stressed(mut self, text: &str) -> Result<Self, LexiconError> {
        self.stressed.extend(parse_entries(text)?);
        Ok(self)
    }

    /// Add unstressed entries from a file.
    pub fn with_unstressed_file(self, path: &Path) -> Result<Self, LexiconError> {
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = self.with_unstressed(&text)?;
        log::info!("Loaded exceptions from {}", path.display());
        Ok(table)
    }

    /// Look up a normalised word in the unstressed table.
    pub fn unstressed(&self, word: &str) -> Option<&[Phone]> {
        self.unstressed.get(word).map(|p| p.as_slice())
    }

    /// Look up a normalised word in the stressed table.
    pub fn stressed(&self, word: &str) -> Option<&[Phone]> {
        self.stressed.get(word).map(|p| p.as_slice())
    }

    pub fn len(&self) -> usize {
        self.unstressed.len() + self.stressed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
