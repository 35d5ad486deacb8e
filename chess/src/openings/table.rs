//! ECO reference table: `(moves, eco, name, description)`.
//!
//! Keys are SAN moves joined by a single space. Keys must be unique.

pub(super) const ENTRIES: &[(&str, &str, &str, &str)] = &[
    // King's Pawn Openings (1. e4)
    ("e4", "B00", "King's Pawn Opening", "The most popular opening move, controlling the center and freeing the queen and bishop."),
    ("e4 e5", "C20", "Open Game", "Both sides contest the center directly."),
    ("e4 e5 Nf3", "C40", "King's Knight Opening", "Developing the knight while attacking the e5 pawn."),
    ("e4 e5 Nf3 Nc6", "C44", "King's Knight Opening: Normal Variation", "Black defends the e5 pawn with the knight."),
    ("e4 e5 Nf3 Nc6 Bb5", "C60", "Ruy Lopez", "One of the oldest and most respected openings, putting pressure on Black's center."),
    ("e4 e5 Nf3 Nc6 Bb5 a6", "C78", "Ruy Lopez: Morphy Defense", "The main line, asking the bishop to declare its intentions."),
    ("e4 e5 Nf3 Nc6 Bb5 a6 Ba4", "C78", "Ruy Lopez: Morphy Defense, Columbus Variation", "White retreats the bishop while maintaining pressure."),
    ("e4 e5 Nf3 Nc6 Bb5 Nf6", "C65", "Ruy Lopez: Berlin Defense", "A solid defense popular at the highest levels."),
    ("e4 e5 Nf3 Nc6 Bc4", "C50", "Italian Game", "The bishop targets the vulnerable f7 square."),
    ("e4 e5 Nf3 Nc6 Bc4 Bc5", "C53", "Italian Game: Giuoco Piano", "A quiet but effective development pattern."),
    ("e4 e5 Nf3 Nc6 Bc4 Nf6", "C55", "Italian Game: Two Knights Defense", "An aggressive response from Black."),
    ("e4 e5 Nf3 Nc6 d4", "C45", "Scotch Game", "An immediate central confrontation."),
    ("e4 e5 Nf3 Nf6", "C42", "Petrov's Defense", "A solid, symmetrical response."),
    ("e4 e5 Nc3", "C25", "Vienna Game", "Preparing f2-f4 with extra support."),
    ("e4 e5 f4", "C30", "King's Gambit", "A romantic sacrifice for rapid development and attack."),
    ("e4 e5 d4", "C21", "Center Game", "Immediately challenging the center."),
    // Sicilian Defense
    ("e4 c5", "B20", "Sicilian Defense", "The most popular response to e4, creating an asymmetrical pawn structure."),
    ("e4 c5 Nf3", "B30", "Sicilian Defense: Open", "The main line Sicilian."),
    ("e4 c5 Nf3 d6", "B90", "Sicilian Defense: Najdorf Variation", "Bobby Fischer's favorite, very sharp and complex."),
    ("e4 c5 Nf3 Nc6", "B30", "Sicilian Defense: Classical Variation", "Developing the knight before committing the d-pawn."),
    ("e4 c5 Nf3 e6", "B40", "Sicilian Defense: French Variation", "A flexible setup allowing Sicilian Kan or Taimanov."),
    ("e4 c5 Nc3", "B23", "Sicilian Defense: Closed", "Avoiding the main lines for a quieter game."),
    ("e4 c5 c3", "B22", "Sicilian Defense: Alapin Variation", "Preparing d4 with pawn support."),
    ("e4 c5 d4", "B21", "Sicilian Defense: Smith-Morra Gambit", "A gambit offering a pawn for rapid development."),
    // French Defense
    ("e4 e6", "C00", "French Defense", "A solid, strategic defense building a strong pawn chain."),
    ("e4 e6 d4", "C00", "French Defense", "White occupies the center."),
    ("e4 e6 d4 d5", "C10", "French Defense: Normal Variation", "The main French structure."),
    ("e4 e6 d4 d5 Nc3", "C10", "French Defense: Paulsen Variation", "Defending the e4 pawn with the knight."),
    ("e4 e6 d4 d5 Nd2", "C03", "French Defense: Tarrasch Variation", "Avoiding doubled pawns after potential ...dxe4."),
    ("e4 e6 d4 d5 e5", "C02", "French Defense: Advance Variation", "White advances to create a spatial advantage."),
    ("e4 e6 d4 d5 exd5", "C01", "French Defense: Exchange Variation", "A symmetrical structure leading to simpler positions."),
    // Caro-Kann Defense
    ("e4 c6", "B10", "Caro-Kann Defense", "A solid defense preparing ...d5 with support."),
    ("e4 c6 d4", "B12", "Caro-Kann Defense", "White takes the center."),
    ("e4 c6 d4 d5", "B12", "Caro-Kann Defense: Main Line", "The typical Caro-Kann structure."),
    ("e4 c6 d4 d5 Nc3", "B18", "Caro-Kann Defense: Classical Variation", "The main line."),
    ("e4 c6 d4 d5 e5", "B12", "Caro-Kann Defense: Advance Variation", "Gaining space but allowing Black counterplay."),
    // Pirc/Modern
    ("e4 d6", "B07", "Pirc Defense", "A flexible hypermodern approach."),
    ("e4 g6", "B06", "Modern Defense", "Delaying central occupation."),
    // Scandinavian
    ("e4 d5", "B01", "Scandinavian Defense", "Immediately challenging White's center."),
    ("e4 d5 exd5", "B01", "Scandinavian Defense", "White captures the pawn."),
    ("e4 d5 exd5 Qxd5", "B01", "Scandinavian Defense: Mieses-Kotrč Variation", "The classical recapture with the queen."),
    ("e4 d5 exd5 Nf6", "B01", "Scandinavian Defense: Modern Variation", "Black develops the knight instead of recapturing."),
    // Alekhine's Defense
    ("e4 Nf6", "B02", "Alekhine's Defense", "Provoking White's pawns to advance."),
    // Queen's Pawn Openings (1. d4)
    ("d4", "A40", "Queen's Pawn Opening", "A solid center pawn, already protected by the queen."),
    ("d4 d5", "D00", "Queen's Pawn Game", "Symmetrical center control."),
    ("d4 d5 c4", "D06", "Queen's Gambit", "The classic opening, offering a pawn for central control."),
    ("d4 d5 c4 e6", "D30", "Queen's Gambit Declined", "Black declines the gambit and solidifies the center."),
    ("d4 d5 c4 dxc4", "D20", "Queen's Gambit Accepted", "Black accepts the pawn, planning ...b5 or giving it back."),
    ("d4 d5 c4 c6", "D10", "Slav Defense", "A solid defense supporting d5 with a pawn."),
    // Indian Defenses
    ("d4 Nf6", "A45", "Indian Defense", "A flexible response, not yet committing to a pawn structure."),
    ("d4 Nf6 c4", "A50", "Indian Defense", "White expands in the center."),
    ("d4 Nf6 c4 e6", "E00", "Indian Defense", "Preparing either ...Bb4 (Nimzo) or ...d5 (QGD)."),
    ("d4 Nf6 c4 e6 Nc3", "E20", "Indian Defense: Nimzo-Indian or Queen's Indian", "Black can now choose between setups."),
    ("d4 Nf6 c4 e6 Nc3 Bb4", "E20", "Nimzo-Indian Defense", "One of the most respected defenses against 1.d4."),
    ("d4 Nf6 c4 e6 Nf3", "E12", "Queen's Indian Defense", "White avoids the pin of Nc3."),
    ("d4 Nf6 c4 e6 Nf3 b6", "E12", "Queen's Indian Defense", "Fianchettoing the bishop."),
    ("d4 Nf6 c4 g6", "E60", "King's Indian Defense", "A hypermodern approach allowing White center control."),
    ("d4 Nf6 c4 g6 Nc3 Bg7", "E61", "King's Indian Defense", "Completing the fianchetto."),
    ("d4 Nf6 c4 g6 Nc3 d5", "D80", "Grünfeld Defense", "Striking the center immediately."),
    ("d4 Nf6 c4 c5", "A56", "Benoni Defense", "An aggressive counter to d4."),
    // Dutch Defense
    ("d4 f5", "A80", "Dutch Defense", "An aggressive response, fighting for e4 control."),
    // English Opening
    ("c4", "A10", "English Opening", "A flexible opening controlling d5."),
    ("c4 e5", "A20", "English Opening: Reversed Sicilian", "Playing a Sicilian with an extra tempo."),
    ("c4 c5", "A30", "English Opening: Symmetrical Variation", "Both sides control the center diagonally."),
    ("c4 Nf6", "A15", "English Opening: Anglo-Indian Defense", "A flexible response."),
    // Réti Opening
    ("Nf3", "A04", "Réti Opening", "A hypermodern approach, controlling the center from the flank."),
    ("Nf3 d5", "A05", "Réti Opening", "Black occupies the center."),
    ("Nf3 d5 c4", "A05", "Réti Opening: King's Indian Attack", "Challenging the d5 pawn."),
    // Catalan
    ("d4 Nf6 c4 e6 g3", "E00", "Catalan Opening", "A sophisticated system fianchettoing the light-squared bishop."),
    // London System
    ("d4 d5 Bf4", "D00", "London System", "A solid, flexible system for White."),
    ("d4 Nf6 Bf4", "A45", "London System", "The London setup against Indian defenses."),
    // Bird's Opening
    ("f4", "A02", "Bird's Opening", "An unusual but playable flank opening."),
    // King's Indian Attack
    ("Nf3 d5 g3", "A07", "King's Indian Attack", "A universal system for White."),
];
