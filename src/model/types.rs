use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bond type string: '{0}'")]
pub struct ParseBondTypeError(String);

/// Expands one `Symbol = Z, mass;` row per element into the [`Element`] enum
/// together with its symbol and standard atomic weight lookups.
macro_rules! element_table {
    ($($name:ident = $z:literal, $mass:literal;)+) => {
        /// A chemical element, discriminant equal to its atomic number.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Element {
            $($name = $z,)+
        }

        impl Element {
            /// Every element in atomic-number order.
            pub const ALL: &'static [Element] = &[$(Element::$name,)+];

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Element::$name => stringify!($name),)+
                }
            }

            /// Standard atomic weight in g/mol.
            pub fn atomic_mass(&self) -> f64 {
                match self {
                    $(Element::$name => $mass,)+
                }
            }
        }
    };
}

element_table! {
    H = 1, 1.008;
    He = 2, 4.0026;
    Li = 3, 6.94;
    Be = 4, 9.0122;
    B = 5, 10.81;
    C = 6, 12.011;
    N = 7, 14.007;
    O = 8, 15.999;
    F = 9, 18.998;
    Ne = 10, 20.18;
    Na = 11, 22.99;
    Mg = 12, 24.305;
    Al = 13, 26.982;
    Si = 14, 28.085;
    P = 15, 30.974;
    S = 16, 32.06;
    Cl = 17, 35.45;
    Ar = 18, 39.948;
    K = 19, 39.098;
    Ca = 20, 40.078;
    Sc = 21, 44.956;
    Ti = 22, 47.867;
    V = 23, 50.942;
    Cr = 24, 51.996;
    Mn = 25, 54.938;
    Fe = 26, 55.845;
    Co = 27, 58.933;
    Ni = 28, 58.693;
    Cu = 29, 63.546;
    Zn = 30, 65.38;
    Ga = 31, 69.723;
    Ge = 32, 72.63;
    As = 33, 74.922;
    Se = 34, 78.971;
    Br = 35, 79.904;
    Kr = 36, 83.798;
    Rb = 37, 85.468;
    Sr = 38, 87.62;
    Y = 39, 88.906;
    Zr = 40, 91.224;
    Nb = 41, 92.906;
    Mo = 42, 95.96;
    Tc = 43, 98.0;
    Ru = 44, 101.07;
    Rh = 45, 102.91;
    Pd = 46, 106.42;
    Ag = 47, 107.87;
    Cd = 48, 112.41;
    In = 49, 114.82;
    Sn = 50, 118.71;
    Sb = 51, 121.76;
    Te = 52, 127.6;
    I = 53, 126.9;
    Xe = 54, 131.29;
    Cs = 55, 132.91;
    Ba = 56, 137.33;
    La = 57, 138.91;
    Ce = 58, 140.12;
    Pr = 59, 140.91;
    Nd = 60, 144.24;
    Pm = 61, 145.0;
    Sm = 62, 150.36;
    Eu = 63, 151.96;
    Gd = 64, 157.25;
    Tb = 65, 158.93;
    Dy = 66, 162.5;
    Ho = 67, 164.93;
    Er = 68, 167.26;
    Tm = 69, 168.93;
    Yb = 70, 173.05;
    Lu = 71, 174.97;
    Hf = 72, 178.49;
    Ta = 73, 180.95;
    W = 74, 183.84;
    Re = 75, 186.21;
    Os = 76, 190.23;
    Ir = 77, 192.22;
    Pt = 78, 195.08;
    Au = 79, 196.97;
    Hg = 80, 200.59;
    Tl = 81, 204.38;
    Pb = 82, 207.2;
    Bi = 83, 208.98;
    Po = 84, 209.0;
    At = 85, 210.0;
    Rn = 86, 222.0;
    Fr = 87, 223.0;
    Ra = 88, 226.0;
    Ac = 89, 227.0;
    Th = 90, 232.04;
    Pa = 91, 231.04;
    U = 92, 238.03;
    Np = 93, 237.0;
    Pu = 94, 244.0;
    Am = 95, 243.0;
    Cm = 96, 247.0;
    Bk = 97, 247.0;
    Cf = 98, 251.0;
    Es = 99, 252.0;
    Fm = 100, 257.0;
    Md = 101, 258.0;
    No = 102, 259.0;
    Lr = 103, 262.0;
    Rf = 104, 267.0;
    Db = 105, 270.0;
    Sg = 106, 271.0;
    Bh = 107, 270.0;
    Hs = 108, 277.0;
    Mt = 109, 276.0;
    Ds = 110, 281.0;
    Rg = 111, 280.0;
    Cn = 112, 285.0;
    Nh = 113, 284.0;
    Fl = 114, 289.0;
    Mc = 115, 288.0;
    Lv = 116, 293.0;
    Ts = 117, 294.0;
    Og = 118, 294.0;
}

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn from_atomic_number(z: u8) -> Option<Self> {
        Self::ALL.get(usize::from(z).checked_sub(1)?).copied()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.symbol() == s)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

/// Bond multiplicity as expressible in a V2000 bond block.
///
/// The discriminant is the Molfile bond-type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BondType {
    Single = 1,
    Double = 2,
    Triple = 3,
}

impl BondType {
    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(BondType::Single),
            2 => Some(BondType::Double),
            3 => Some(BondType::Triple),
            _ => None,
        }
    }

    pub fn value(&self) -> f64 {
        f64::from(self.code())
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondType::Single => write!(f, "Single"),
            BondType::Double => write!(f, "Double"),
            BondType::Triple => write!(f, "Triple"),
        }
    }
}

impl FromStr for BondType {
    type Err = ParseBondTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "1" => Ok(BondType::Single),
            "double" | "2" => Ok(BondType::Double),
            "triple" | "3" => Ok(BondType::Triple),
            _ => Err(ParseBondTypeError(s.to_string())),
        }
    }
}
