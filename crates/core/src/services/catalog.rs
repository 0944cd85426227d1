//! Built-in instrument lists the market-data generator draws from.
//! Each list holds 50 `(symbol, name)` pairs.

pub const STOCKS: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corp."),
    ("AMZN", "Amazon.com Inc."),
    ("GOOGL", "Alphabet Inc."),
    ("META", "Meta Platforms Inc."),
    ("TSLA", "Tesla Inc."),
    ("NVDA", "NVIDIA Corp."),
    ("JPM", "JPMorgan Chase & Co."),
    ("V", "Visa Inc."),
    ("JNJ", "Johnson & Johnson"),
    ("WMT", "Walmart Inc."),
    ("PG", "Procter & Gamble Co."),
    ("MA", "Mastercard Inc."),
    ("UNH", "UnitedHealth Group Inc."),
    ("HD", "Home Depot Inc."),
    ("BAC", "Bank of America Corp."),
    ("XOM", "Exxon Mobil Corp."),
    ("INTC", "Intel Corp."),
    ("VZ", "Verizon Communications Inc."),
    ("PFE", "Pfizer Inc."),
    ("9984.T", "SoftBank Group Corp."),
    ("7203.T", "Toyota Motor Corp."),
    ("6758.T", "Sony Group Corp."),
    ("HSBA.L", "HSBC Holdings plc"),
    ("SHEL.L", "Shell plc"),
    ("GSK.L", "GSK plc"),
    ("AIR.PA", "Airbus SE"),
    ("MC.PA", "LVMH Moët Hennessy"),
    ("SAP.DE", "SAP SE"),
    ("SIE.DE", "Siemens AG"),
    ("VOW3.DE", "Volkswagen AG"),
    ("SAN.MC", "Banco Santander, S.A."),
    ("ENEL.MI", "Enel SpA"),
    ("NOVN.SW", "Novartis AG"),
    ("ROG.SW", "Roche Holding AG"),
    ("NESN.SW", "Nestlé S.A."),
    ("CBA.AX", "Commonwealth Bank"),
    ("BHP.AX", "BHP Group Ltd"),
    ("600519.SS", "Kweichow Moutai Co"),
    ("601398.SS", "ICBC"),
    ("005930.KS", "Samsung Electronics Co"),
    ("RIL.NS", "Reliance Industries"),
    ("TCS.NS", "Tata Consultancy"),
    ("VALE3.SA", "Vale S.A."),
    ("PETR4.SA", "Petróleo Brasileiro"),
    ("SU.TO", "Suncor Energy Inc."),
    ("TD.TO", "Toronto-Dominion Bank"),
    ("SAPRE.MX", "Santander México"),
    ("WALMEX.MX", "Walmart de México"),
    ("ROSN.ME", "Rosneft Oil Company"),
];

pub const CRYPTO: &[(&str, &str)] = &[
    ("BTC", "Bitcoin"),
    ("ETH", "Ethereum"),
    ("BNB", "Binance Coin"),
    ("XRP", "XRP"),
    ("ADA", "Cardano"),
    ("SOL", "Solana"),
    ("DOT", "Polkadot"),
    ("DOGE", "Dogecoin"),
    ("AVAX", "Avalanche"),
    ("MATIC", "Polygon"),
    ("LINK", "Chainlink"),
    ("UNI", "Uniswap"),
    ("LTC", "Litecoin"),
    ("ALGO", "Algorand"),
    ("XLM", "Stellar"),
    ("FTM", "Fantom"),
    ("ATOM", "Cosmos"),
    ("VET", "VeChain"),
    ("MANA", "Decentraland"),
    ("SAND", "The Sandbox"),
    ("AXS", "Axie Infinity"),
    ("AAVE", "Aave"),
    ("EGLD", "Elrond"),
    ("THETA", "Theta Network"),
    ("XTZ", "Tezos"),
    ("EOS", "EOS"),
    ("MKR", "Maker"),
    ("NEO", "NEO"),
    ("ZEC", "Zcash"),
    ("DASH", "Dash"),
    ("BAT", "Basic Attention Token"),
    ("ENJ", "Enjin Coin"),
    ("COMP", "Compound"),
    ("HBAR", "Hedera"),
    ("HOT", "Holo"),
    ("ZIL", "Zilliqa"),
    ("CAKE", "PancakeSwap"),
    ("FLOW", "Flow"),
    ("ONE", "Harmony"),
    ("CHZ", "Chiliz"),
    ("WAVES", "Waves"),
    ("STX", "Stacks"),
    ("AR", "Arweave"),
    ("KAVA", "Kava"),
    ("SC", "Siacoin"),
    ("XMR", "Monero"),
    ("ICX", "ICON"),
    ("ZRX", "0x"),
    ("YFI", "yearn.finance"),
    ("RVN", "Ravencoin"),
];

pub const FOREX: &[(&str, &str)] = &[
    ("EUR/USD", "Euro / US Dollar"),
    ("USD/JPY", "US Dollar / Japanese Yen"),
    ("GBP/USD", "British Pound / US Dollar"),
    ("USD/CHF", "US Dollar / Swiss Franc"),
    ("AUD/USD", "Australian Dollar / US Dollar"),
    ("USD/CAD", "US Dollar / Canadian Dollar"),
    ("NZD/USD", "New Zealand Dollar / US Dollar"),
    ("EUR/GBP", "Euro / British Pound"),
    ("EUR/JPY", "Euro / Japanese Yen"),
    ("GBP/JPY", "British Pound / Japanese Yen"),
    ("AUD/JPY", "Australian Dollar / Japanese Yen"),
    ("EUR/AUD", "Euro / Australian Dollar"),
    ("USD/HKD", "US Dollar / Hong Kong Dollar"),
    ("USD/SGD", "US Dollar / Singapore Dollar"),
    ("USD/INR", "US Dollar / Indian Rupee"),
    ("USD/MXN", "US Dollar / Mexican Peso"),
    ("USD/ZAR", "US Dollar / South African Rand"),
    ("USD/TRY", "US Dollar / Turkish Lira"),
    ("USD/BRL", "US Dollar / Brazilian Real"),
    ("USD/CNH", "US Dollar / Chinese Yuan Offshore"),
    ("USD/RUB", "US Dollar / Russian Ruble"),
    ("USD/PLN", "US Dollar / Polish Zloty"),
    ("USD/THB", "US Dollar / Thai Baht"),
    ("USD/SEK", "US Dollar / Swedish Krona"),
    ("USD/NOK", "US Dollar / Norwegian Krone"),
    ("USD/DKK", "US Dollar / Danish Krone"),
    ("USD/CZK", "US Dollar / Czech Koruna"),
    ("USD/HUF", "US Dollar / Hungarian Forint"),
    ("USD/ILS", "US Dollar / Israeli Shekel"),
    ("USD/KRW", "US Dollar / South Korean Won"),
    ("USD/ARS", "US Dollar / Argentine Peso"),
    ("USD/CLP", "US Dollar / Chilean Peso"),
    ("USD/COP", "US Dollar / Colombian Peso"),
    ("USD/IDR", "US Dollar / Indonesian Rupiah"),
    ("USD/KWD", "US Dollar / Kuwaiti Dinar"),
    ("USD/MYR", "US Dollar / Malaysian Ringgit"),
    ("USD/PHP", "US Dollar / Philippine Peso"),
    ("USD/SAR", "US Dollar / Saudi Riyal"),
    ("USD/TWD", "US Dollar / Taiwan Dollar"),
    ("USD/AED", "US Dollar / UAE Dirham"),
    ("AUD/CAD", "Australian Dollar / Canadian Dollar"),
    ("AUD/CHF", "Australian Dollar / Swiss Franc"),
    ("AUD/NZD", "Australian Dollar / New Zealand Dollar"),
    ("CAD/CHF", "Canadian Dollar / Swiss Franc"),
    ("CAD/JPY", "Canadian Dollar / Japanese Yen"),
    ("CHF/JPY", "Swiss Franc / Japanese Yen"),
    ("EUR/CAD", "Euro / Canadian Dollar"),
    ("EUR/CHF", "Euro / Swiss Franc"),
    ("EUR/NZD", "Euro / New Zealand Dollar"),
    ("GBP/AUD", "British Pound / Australian Dollar"),
];

pub const FUNDS: &[(&str, &str)] = &[
    ("VFIAX", "Vanguard 500 Index Fund"),
    ("FXAIX", "Fidelity 500 Index Fund"),
    ("VTSAX", "Vanguard Total Stock Market Index Fund"),
    ("FSKAX", "Fidelity Total Market Index Fund"),
    ("VBTLX", "Vanguard Total Bond Market Index Fund"),
    ("FTBFX", "Fidelity Total Bond Fund"),
    ("VTIAX", "Vanguard Total International Stock Index Fund"),
    ("FTIHX", "Fidelity Total International Index Fund"),
    ("VGSLX", "Vanguard Real Estate Index Fund"),
    ("FREL", "Fidelity Real Estate Index Fund"),
    ("VWIGX", "Vanguard International Growth Fund"),
    ("FIGFX", "Fidelity International Growth Fund"),
    ("VTSMX", "Vanguard Total Stock Market Index Fund"),
    ("VFINX", "Vanguard 500 Index Fund"),
    ("VDIGX", "Vanguard Dividend Growth Fund"),
    ("FDGFX", "Fidelity Dividend Growth Fund"),
    ("VGHCX", "Vanguard Health Care Fund"),
    ("FSPHX", "Fidelity Select Health Care Portfolio"),
    ("VITPX", "Vanguard Information Technology Index Fund"),
    ("FSPTX", "Fidelity Select Technology Portfolio"),
    ("PRGFX", "T. Rowe Price Growth Stock Fund"),
    ("AGTHX", "American Funds The Growth Fund of America"),
    ("AIVSX", "American Funds Investment Company of America"),
    ("FCNTX", "Fidelity Contrafund"),
    ("DODGX", "Dodge & Cox Stock Fund"),
    ("VWELX", "Vanguard Wellington Fund"),
    ("ABALX", "American Funds American Balanced Fund"),
    ("VWINX", "Vanguard Wellesley Income Fund"),
    ("SWPPX", "Schwab S&P 500 Index Fund"),
    ("SWTSX", "Schwab Total Stock Market Index Fund"),
    ("SWAGX", "Schwab U.S. Aggregate Bond Index Fund"),
    ("SWISX", "Schwab International Index Fund"),
    ("VGENX", "Vanguard Energy Fund"),
    ("FSENX", "Fidelity Select Energy Portfolio"),
    ("VFAIX", "Vanguard FTSE Social Index Fund"),
    ("FBIOX", "Fidelity Select Biotechnology Portfolio"),
    ("FBGRX", "Fidelity Blue Chip Growth Fund"),
    ("FDGRX", "Fidelity Growth Company Fund"),
    ("VHCOX", "Vanguard High Dividend Yield Index Fund"),
    ("VMVFX", "Vanguard Mid-Cap Value Index Fund"),
    ("VIMAX", "Vanguard Mid-Cap Index Fund"),
    ("VSMAX", "Vanguard Small-Cap Index Fund"),
    ("VSIAX", "Vanguard Small-Cap Value Index Fund"),
    ("VSGAX", "Vanguard Small-Cap Growth Index Fund"),
    ("VMGMX", "Vanguard Mid-Cap Growth Index Fund"),
    ("VIGAX", "Vanguard Growth Index Fund"),
    ("VEMAX", "Vanguard Emerging Markets Stock Index Fund"),
    ("VEUSX", "Vanguard European Stock Index Fund"),
    ("VPACX", "Vanguard Pacific Stock Index Fund"),
    ("VGWAX", "Vanguard Global Wellington Fund"),
];
